//! Document lifecycle over any [`DocumentStore`].
//!
//! Store outcomes are translated into [`CorpusError`] values; nothing is
//! retried and nothing is printed. Callers decide how to surface them.

use crate::document::{DocId, Document, DocumentPatch, NewDocument};
use crate::error::{CorpusError, Result};
use crate::index::InvertedIndex;
use crate::store::DocumentStore;

/// Outcome of an update that matched a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Modified,
    /// The document already held exactly these values.
    Unchanged,
}

/// Analyze the text and insert a new document. Fails on a duplicate id.
pub fn create_document<S: DocumentStore + ?Sized>(store: &S, input: NewDocument) -> Result<Document> {
    let doc = Document::build(input);
    let res = store.store_one(&doc)?;
    if !res.acknowledged {
        return Err(CorpusError::Unacknowledged("insert"));
    }
    tracing::info!(collection = store.name(), id = %doc.id, terms = doc.terms.len(), num_chars = doc.num_chars, "created document");
    Ok(doc)
}

pub fn delete_document<S: DocumentStore + ?Sized>(store: &S, id: &DocId) -> Result<()> {
    let res = store.delete_one(id)?;
    if !res.acknowledged {
        return Err(CorpusError::Unacknowledged("delete"));
    }
    if res.deleted_count == 0 {
        return Err(CorpusError::NotFound(id.clone()));
    }
    tracing::info!(collection = store.name(), %id, "deleted document");
    Ok(())
}

/// Recompute term statistics from the new text and replace every field but the id.
pub fn update_document<S: DocumentStore + ?Sized>(store: &S, input: NewDocument) -> Result<UpdateStatus> {
    let patch = DocumentPatch::build(input.title, input.text, input.date, input.category);
    let res = store.update_one(&input.id, &patch)?;
    if !res.acknowledged {
        return Err(CorpusError::Unacknowledged("update"));
    }
    if res.matched_count == 0 {
        return Err(CorpusError::NotFound(input.id));
    }
    if res.modified_count == 0 {
        tracing::debug!(collection = store.name(), id = %input.id, "update left document unchanged");
        return Ok(UpdateStatus::Unchanged);
    }
    tracing::info!(collection = store.name(), id = %input.id, terms = patch.terms.len(), "updated document");
    Ok(UpdateStatus::Modified)
}

/// Delete then recreate the document under the same id. A missing document is not an error.
pub fn replace_document<S: DocumentStore + ?Sized>(store: &S, input: NewDocument) -> Result<Document> {
    match delete_document(store, &input.id) {
        Ok(()) | Err(CorpusError::NotFound(_)) => {}
        Err(err) => return Err(err),
    }
    create_document(store, input)
}

/// Scan the whole collection and aggregate its inverted index.
pub fn get_index<S: DocumentStore + ?Sized>(store: &S) -> Result<InvertedIndex> {
    let docs = store.scan_all()?;
    let index = InvertedIndex::from_documents(&docs);
    tracing::info!(collection = store.name(), docs = docs.len(), terms = index.len(), "built inverted index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeleteResult, InsertResult, StoreError, UpdateResult};
    use time::macros::date;

    /// Accepts every call but never acknowledges it.
    struct Unacked;

    impl DocumentStore for Unacked {
        fn name(&self) -> &str {
            "unacked"
        }
        fn store_one(&self, _doc: &Document) -> std::result::Result<InsertResult, StoreError> {
            Ok(InsertResult { acknowledged: false })
        }
        fn delete_one(&self, _id: &DocId) -> std::result::Result<DeleteResult, StoreError> {
            Ok(DeleteResult { acknowledged: false, deleted_count: 0 })
        }
        fn update_one(&self, _id: &DocId, _patch: &DocumentPatch) -> std::result::Result<UpdateResult, StoreError> {
            Ok(UpdateResult { acknowledged: false, matched_count: 0, modified_count: 0 })
        }
        fn scan_all(&self) -> std::result::Result<Vec<Document>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn input(id: i64) -> NewDocument {
        NewDocument {
            id: id.into(),
            title: "T".into(),
            text: "text".into(),
            date: date!(2024 - 03 - 01),
            category: "c".into(),
        }
    }

    #[test]
    fn unacknowledged_is_distinct_from_not_found() {
        assert!(matches!(create_document(&Unacked, input(1)), Err(CorpusError::Unacknowledged("insert"))));
        assert!(matches!(delete_document(&Unacked, &DocId::Int(1)), Err(CorpusError::Unacknowledged("delete"))));
        assert!(matches!(update_document(&Unacked, input(1)), Err(CorpusError::Unacknowledged("update"))));
    }

    #[test]
    fn replace_creates_when_missing() {
        let store = crate::store::MemoryCollection::new("docs");
        let doc = replace_document(&store, input(5)).unwrap();
        assert_eq!(doc.id, DocId::Int(5));
        assert_eq!(store.len(), 1);
    }
}
