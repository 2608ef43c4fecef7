//! Text normalization shared by the classifier, label parsing and term extraction
//!
//! Survey comments arrive with inconsistent accents and casing
//! ("Navegación", "navegacion", "NAVEGACION"). Everything that matches words
//! goes through [`normalize`] first.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip diacritics and collapse whitespace
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into alphanumeric word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
