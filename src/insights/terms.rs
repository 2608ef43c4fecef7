//! Term frequencies over survey comments

use crate::classification::heuristic::is_placeholder;
use crate::text::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tokens shorter than this carry no topic
const MIN_TERM_LEN: usize = 3;

/// Function words dropped before counting (normalized form)
const STOPWORDS: &[&str] = &[
    // spanish
    "que", "los", "las", "del", "por", "para", "con", "una", "uno", "unos", "unas", "como",
    "mas", "pero", "sus", "este", "esta", "esto", "estos", "estas", "ese", "esa", "eso",
    "son", "fue", "ser", "hay", "muy", "sin", "sobre", "entre", "cada", "todo", "todos",
    "algo", "algunas", "algunos", "tambien", "podria", "podrian", "puede", "seria", "creo",
    "hacer", "tiene", "tener", "les", "nos", "mis", "cuando", "donde", "porque", "ya", "aun",
    "bien", "mejor", "mejorar", "agregar", "falta",
    // english
    "the", "and", "for", "with", "that", "this", "are", "was", "but", "not", "you", "have",
    "has", "from", "its", "very", "more", "could", "would", "should", "can", "some", "about",
];

/// Normalized token counts across a comment corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequencies {
    counts: BTreeMap<String, usize>,
    total: usize,
}

/// One term with its count, for the topics section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
    pub frequency: f64,
}

impl TermFrequencies {
    /// Count terms over comments, skipping placeholders
    pub fn from_comments<'a>(comments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;

        for comment in comments.into_iter().filter(|c| !is_placeholder(c)) {
            for token in tokenize(comment) {
                if token.chars().count() < MIN_TERM_LEN || STOPWORDS.contains(&token.as_str()) {
                    continue;
                }
                *counts.entry(token).or_insert(0) += 1;
                total += 1;
            }
        }

        Self { counts, total }
    }

    /// Total counted tokens
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// `count / total`; zero on an empty corpus
    pub fn frequency(&self, term: &str) -> f64 {
        self.share(self.count(term))
    }

    /// Combined frequency of every term starting with one of `stems`
    pub fn group_frequency(&self, stems: &[&str]) -> f64 {
        let hits = self
            .counts
            .iter()
            .filter(|(term, _)| stems.iter().any(|stem| term.starts_with(stem)))
            .map(|(_, count)| count)
            .sum();
        self.share(hits)
    }

    /// Most frequent terms; ties broken alphabetically
    pub fn top_terms(&self, n: usize) -> Vec<TermCount> {
        let mut terms: Vec<(&String, &usize)> = self.counts.iter().collect();
        terms.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        terms
            .into_iter()
            .take(n)
            .map(|(term, count)| TermCount {
                term: term.clone(),
                count: *count,
                frequency: self.share(*count),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}
