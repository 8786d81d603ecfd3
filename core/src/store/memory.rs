use super::{DeleteResult, DocumentStore, InsertResult, StoreError, UpdateResult};
use crate::document::{DocId, Document, DocumentPatch};
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// A collection held entirely in memory. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryCollection {
    name: String,
    docs: RwLock<BTreeMap<DocId, Document>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), docs: RwLock::new(BTreeMap::new()) }
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    pub fn get(&self, id: &DocId) -> Option<Document> {
        self.docs.read().get(id).cloned()
    }
}

impl DocumentStore for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn store_one(&self, doc: &Document) -> Result<InsertResult, StoreError> {
        match self.docs.write().entry(doc.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(doc.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(doc.clone());
                Ok(InsertResult { acknowledged: true })
            }
        }
    }

    fn delete_one(&self, id: &DocId) -> Result<DeleteResult, StoreError> {
        let removed = self.docs.write().remove(id);
        Ok(DeleteResult { acknowledged: true, deleted_count: removed.is_some() as u64 })
    }

    fn update_one(&self, id: &DocId, patch: &DocumentPatch) -> Result<UpdateResult, StoreError> {
        let mut docs = self.docs.write();
        let result = match docs.get_mut(id) {
            None => UpdateResult { acknowledged: true, matched_count: 0, modified_count: 0 },
            Some(doc) => UpdateResult {
                acknowledged: true,
                matched_count: 1,
                modified_count: doc.apply(patch) as u64,
            },
        };
        Ok(result)
    }

    fn scan_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.docs.read().values().cloned().collect())
    }
}
