use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
}

/// Occurrence statistics for one distinct term of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStat {
    pub term: String,
    pub count: u32,
    /// Length of the term in characters.
    pub num_chars: u32,
}

/// Term statistics derived from a document's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// One entry per distinct term, in first-occurrence order.
    pub terms: Vec<TermStat>,
    /// Sum of term lengths over every occurrence.
    pub num_chars: u64,
}

/// Split text into lowercased runs of alphanumeric characters, keeping every occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
    RE.find_iter(text).map(|mat| mat.as_str().to_lowercase()).collect()
}

/// Count every term of `text` and the total number of term characters.
pub fn analyze(text: &str) -> TextStats {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut stats = TextStats::default();
    for term in tokenize(text) {
        let len = term.chars().count() as u32;
        stats.num_chars += len as u64;
        match slots.get(&term) {
            Some(&slot) => stats.terms[slot].count += 1,
            None => {
                slots.insert(term.clone(), stats.terms.len());
                stats.terms.push(TermStat { term, count: 1, num_chars: len });
            }
        }
    }
    stats
}
