use crate::document::Document;
use serde::Serialize;
use std::collections::BTreeMap;

/// In-memory inverted index: term -> document title -> summed occurrence count.
///
/// Never persisted; rebuild it from a collection scan whenever it is needed.
#[derive(Debug, Default, Clone, Serialize)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeMap<String, u64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut index = Self::new();
        for doc in docs {
            index.add_document(doc);
        }
        index
    }

    /// Fold one document's term statistics into the index. Documents sharing a title accumulate.
    pub fn add_document(&mut self, doc: &Document) {
        for stat in &doc.terms {
            *self
                .postings
                .entry(stat.term.clone())
                .or_default()
                .entry(doc.title.clone())
                .or_insert(0) += stat.count as u64;
        }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Indexed terms in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    /// Summed count of `term` within documents titled `title`.
    pub fn count(&self, term: &str, title: &str) -> Option<u64> {
        self.postings.get(term)?.get(title).copied()
    }

    /// Formatted listing for one term, e.g. `"A:2, B:1"`.
    pub fn entry(&self, term: &str) -> Option<String> {
        self.postings.get(term).map(format_titles)
    }

    /// Every term mapped to its formatted listing, enumerated in term order.
    pub fn formatted(&self) -> BTreeMap<String, String> {
        self.postings
            .iter()
            .map(|(term, titles)| (term.clone(), format_titles(titles)))
            .collect()
    }
}

fn format_titles(titles: &BTreeMap<String, u64>) -> String {
    titles
        .iter()
        .map(|(title, count)| format!("{title}:{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NewDocument;
    use time::macros::date;

    fn doc(id: i64, title: &str, text: &str) -> Document {
        Document::build(NewDocument {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            date: date!(2024 - 01 - 01),
            category: "test".into(),
        })
    }

    #[test]
    fn empty_input_gives_empty_index() {
        let index = InvertedIndex::from_documents(&Vec::<Document>::new());
        assert!(index.is_empty());
        assert!(index.formatted().is_empty());
    }

    #[test]
    fn same_title_sums_counts() {
        let docs = vec![doc(1, "A", "sun"), doc(2, "A", "sun sun")];
        let index = InvertedIndex::from_documents(&docs);
        assert_eq!(index.count("sun", "A"), Some(3));
        assert_eq!(index.entry("sun").as_deref(), Some("A:3"));
    }
}
