//! Word lists for the heuristic classifier
//!
//! All entries are in normalized form (lowercase, no diacritics), matching the
//! output of [`crate::text::normalize`]. Comments in the surveys this engine
//! was built for are mostly Spanish, so the lists carry Spanish first and a
//! smaller English set.

use crate::types::Category;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Comments that carry no feedback ("no comment" equivalents)
pub const PLACEHOLDERS: &[&str] = &[
    "sin comentario",
    "sin comentarios",
    "sin observacion",
    "sin observaciones",
    "ninguno",
    "ninguna",
    "ninguna observacion",
    "nada",
    "no",
    "n/a",
    "na",
    "none",
    "no comment",
    "no comments",
    "nothing",
];

/// Words that flip the polarity of the next one or two words
pub const NEGATIONS: &[&str] = &["no", "nunca", "ni", "sin", "not", "never", "nothing"];

/// Words that strengthen the polarity of the next word
pub const INTENSIFIERS: &[&str] = &["muy", "bastante", "super", "very", "really"];

/// Base polarity per word in [-1, 1]
pub static POLARITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("excelente", 1.0),
        ("excellent", 1.0),
        ("perfecto", 0.9),
        ("perfect", 0.9),
        ("genial", 0.8),
        ("great", 0.8),
        ("encanta", 0.8),
        ("gusta", 0.6),
        ("gustan", 0.6),
        ("gusto", 0.6),
        ("love", 0.8),
        ("bueno", 0.7),
        ("buena", 0.7),
        ("buen", 0.7),
        ("good", 0.7),
        ("satisfecho", 0.7),
        ("satisfecha", 0.7),
        ("agradable", 0.6),
        ("nice", 0.6),
        ("util", 0.6),
        ("useful", 0.6),
        ("intuitivo", 0.6),
        ("intuitiva", 0.6),
        ("intuitive", 0.6),
        ("bien", 0.5),
        ("facil", 0.5),
        ("easy", 0.5),
        ("didactico", 0.5),
        ("didacticos", 0.5),
        ("interesante", 0.5),
        ("practico", 0.5),
        ("clear", 0.4),
        ("claro", 0.4),
        ("clara", 0.4),
        ("rapido", 0.4),
        ("fast", 0.4),
        ("relevante", 0.4),
        ("llamativo", 0.4),
        ("llamativos", 0.4),
        // negative
        ("terrible", -1.0),
        ("pesimo", -1.0),
        ("awful", -1.0),
        ("frustrante", -0.8),
        ("frustrating", -0.8),
        ("malo", -0.7),
        ("mala", -0.7),
        ("bad", -0.7),
        ("inutil", -0.7),
        ("useless", -0.7),
        ("confuso", -0.6),
        ("confusa", -0.6),
        ("confusing", -0.6),
        ("engorroso", -0.6),
        ("complicado", -0.5),
        ("dificil", -0.5),
        ("difficult", -0.5),
        ("lento", -0.5),
        ("slow", -0.5),
        ("error", -0.5),
        ("errores", -0.5),
        ("falla", -0.5),
        ("fallas", -0.5),
        ("problema", -0.5),
        ("problemas", -0.5),
        ("inconveniente", -0.5),
        ("inconvenientes", -0.5),
        ("inconsistencias", -0.5),
        ("aburrido", -0.5),
        ("complejo", -0.4),
        ("compleja", -0.4),
        ("costo", -0.4),
        ("costos", -0.4),
        ("hard", -0.3),
    ]
    .into_iter()
    .collect()
});

/// Domain phrases that nudge polarity up by the keyword adjustment
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "excelente",
    "muy bueno",
    "muy buena",
    "todo bien",
    "facil de usar",
    "facil de entender",
    "me gusta",
    "cumple",
    "recomendable",
    "intuitivo",
    "satisfecho",
    "didacticos",
    "excellent",
    "easy to use",
];

/// Domain phrases that nudge polarity down by the keyword adjustment
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "me costo",
    "me costos",
    "dificil",
    "confuso",
    "lento",
    "engorroso",
    "complicado",
    "no funciona",
    "no encontre",
    "falta",
    "falla",
    "error",
    "inconsistencias",
    "hard to use",
    "confusing",
];

/// Token prefixes per topical category, in tie-break order
pub const CATEGORY_STEMS: &[(Category, &[&str])] = &[
    (
        Category::Navigation,
        &[
            "naveg", "filtro", "ubicar", "ubique", "menu", "encontr", "buscar", "seccion",
            "pestan", "navig", "find",
        ],
    ),
    (
        Category::Explainability,
        &[
            "explic", "descripcion", "ayuda", "retroaliment", "mensaje", "tooltip", "interpret",
            "explain", "document",
        ],
    ),
    (
        Category::Visualization,
        &["grafic", "color", "diseno", "visual", "chart", "estadistic", "llamativ"],
    ),
    (
        Category::Usability,
        &["usabil", "usar", "uso", "interactiv", "simplific", "intuitiv", "facil", "easy"],
    ),
    (
        Category::Utility,
        &["util", "decision", "analisis", "analizar", "informacion", "funcion", "cumple", "herramienta"],
    ),
    (
        Category::LearningCurve,
        &["aprend", "principio", "curva", "learn"],
    ),
    (
        Category::Satisfaction,
        &["satisf", "experiencia", "excelente", "bien", "bueno", "buena", "gusta", "agradable"],
    ),
];

/// Stems for one topical category; empty for the non-topical labels
pub fn stems_for(category: Category) -> &'static [&'static str] {
    CATEGORY_STEMS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, stems)| *stems)
        .unwrap_or(&[])
}
