//! Document records and their identifiers.
//!
//! A [`Document`] carries the caller-supplied fields together with the term
//! statistics derived from its text. Both are built at once so they can never
//! disagree.

use crate::tokenizer::{analyze, TermStat};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

/// Identifier of a document within a collection.
///
/// Uses the default externally tagged serde representation so keys encode
/// unambiguously with bincode: `Int(42)` and `Str("abc")` never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocId {
    Int(i64),
    Str(String),
}

impl DocId {
    /// Normalize a textual id: all-digit strings become integers, anything else is kept.
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return DocId::Int(n);
            }
        }
        DocId::Str(raw.to_string())
    }

    /// Build an id from a JSON value. Numbers must be integral.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(DocId::Int),
            serde_json::Value::String(s) => Some(DocId::parse(s)),
            _ => None,
        }
    }
}

impl From<i64> for DocId {
    fn from(n: i64) -> Self {
        DocId::Int(n)
    }
}

impl From<&str> for DocId {
    fn from(raw: &str) -> Self {
        DocId::parse(raw)
    }
}

impl From<String> for DocId {
    fn from(raw: String) -> Self {
        DocId::parse(&raw)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Int(n) => write!(f, "{n}"),
            DocId::Str(s) => f.write_str(s),
        }
    }
}

/// Caller-supplied fields of a document before its text is analyzed.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: DocId,
    pub title: String,
    pub text: String,
    pub date: Date,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub text: String,
    /// Sum of term lengths over every term occurrence in `text`.
    pub num_chars: u64,
    pub date: Date,
    pub category: String,
    pub terms: Vec<TermStat>,
}

impl Document {
    pub fn build(input: NewDocument) -> Self {
        let stats = analyze(&input.text);
        Self {
            id: input.id,
            title: input.title,
            text: input.text,
            num_chars: stats.num_chars,
            date: input.date,
            category: input.category,
            terms: stats.terms,
        }
    }

    /// Overwrite every field except the id. Returns whether anything changed.
    pub fn apply(&mut self, patch: &DocumentPatch) -> bool {
        let before = (
            &self.title,
            &self.text,
            self.num_chars,
            self.date,
            &self.category,
            &self.terms,
        );
        let after = (
            &patch.title,
            &patch.text,
            patch.num_chars,
            patch.date,
            &patch.category,
            &patch.terms,
        );
        if before == after {
            return false;
        }
        self.title = patch.title.clone();
        self.text = patch.text.clone();
        self.num_chars = patch.num_chars;
        self.date = patch.date;
        self.category = patch.category.clone();
        self.terms = patch.terms.clone();
        true
    }
}

/// The fields replaced by an update: everything a [`Document`] has except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub title: String,
    pub text: String,
    pub num_chars: u64,
    pub date: Date,
    pub category: String,
    pub terms: Vec<TermStat>,
}

impl DocumentPatch {
    /// Analyze `text` and bundle it with the other replacement fields.
    pub fn build(title: String, text: String, date: Date, category: String) -> Self {
        let stats = analyze(&text);
        Self {
            title,
            text,
            num_chars: stats.num_chars,
            date,
            category,
            terms: stats.terms,
        }
    }
}

/// Parse a `yyyy-mm-dd` calendar date.
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, time::macros::format_description!("[year]-[month]-[day]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn digit_strings_become_integers() {
        assert_eq!(DocId::parse("42"), DocId::Int(42));
        assert_eq!(DocId::from("42"), DocId::from(42i64));
        assert_eq!(DocId::parse("4a2"), DocId::Str("4a2".into()));
        assert_eq!(DocId::parse("-4"), DocId::Str("-4".into()));
        assert_eq!(DocId::parse(""), DocId::Str(String::new()));
    }

    #[test]
    fn json_ids() {
        assert_eq!(DocId::from_json(&serde_json::json!(7)), Some(DocId::Int(7)));
        assert_eq!(DocId::from_json(&serde_json::json!("7")), Some(DocId::Int(7)));
        assert_eq!(DocId::from_json(&serde_json::json!(1.5)), None);
    }

    #[test]
    fn build_derives_term_stats() {
        let doc = Document::build(NewDocument {
            id: DocId::Int(1),
            title: "Greeting".into(),
            text: "Hello, World!".into(),
            date: date!(2024 - 01 - 05),
            category: "misc".into(),
        });
        assert_eq!(doc.num_chars, 10);
        assert_eq!(doc.terms.len(), 2);
        assert_eq!(doc.num_chars, doc.terms.iter().map(|t| (t.count * t.num_chars) as u64).sum::<u64>());
    }

    #[test]
    fn apply_reports_changes() {
        let mut doc = Document::build(NewDocument {
            id: DocId::Int(1),
            title: "T".into(),
            text: "cat".into(),
            date: date!(2024 - 01 - 05),
            category: "c".into(),
        });
        let same = DocumentPatch::build("T".into(), "cat".into(), date!(2024 - 01 - 05), "c".into());
        assert!(!doc.apply(&same));
        let other = DocumentPatch::build("T".into(), "dog".into(), date!(2024 - 01 - 05), "c".into());
        assert!(doc.apply(&other));
        assert_eq!(doc.terms[0].term, "dog");
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2023-09-14").unwrap(), date!(2023 - 09 - 14));
        assert!(parse_date("14/09/2023").is_err());
    }
}
