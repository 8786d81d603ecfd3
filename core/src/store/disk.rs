use super::{DeleteResult, DocumentStore, InsertResult, StoreError, UpdateResult};
use crate::document::{DocId, Document, DocumentPatch};
use sled::{IVec, Tree};

/// A collection backed by one sled tree. Keys and values are bincode encoded.
#[derive(Clone)]
pub struct SledCollection {
    name: String,
    tree: Tree,
}

impl SledCollection {
    pub fn new(name: impl Into<String>, tree: Tree) -> Self {
        Self { name: name.into(), tree }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn get(&self, id: &DocId) -> Result<Option<Document>, StoreError> {
        match self.tree.get(encode_key(id)?)? {
            Some(bytes) => Ok(Some(decode_doc(&bytes)?)),
            None => Ok(None),
        }
    }
}

fn encode_key(id: &DocId) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(id)?)
}

fn encode_doc(doc: &Document) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(doc)?)
}

fn decode_doc(bytes: &IVec) -> Result<Document, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}

impl DocumentStore for SledCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn store_one(&self, doc: &Document) -> Result<InsertResult, StoreError> {
        let key = encode_key(&doc.id)?;
        let value = encode_doc(doc)?;
        match self.tree.compare_and_swap(key, None::<&[u8]>, Some(value))? {
            Ok(()) => Ok(InsertResult { acknowledged: true }),
            Err(_) => Err(StoreError::DuplicateKey(doc.id.clone())),
        }
    }

    fn delete_one(&self, id: &DocId) -> Result<DeleteResult, StoreError> {
        let removed = self.tree.remove(encode_key(id)?)?;
        Ok(DeleteResult { acknowledged: true, deleted_count: removed.is_some() as u64 })
    }

    fn update_one(&self, id: &DocId, patch: &DocumentPatch) -> Result<UpdateResult, StoreError> {
        let key = encode_key(id)?;
        // Retry until the swap lands on the version we read.
        loop {
            let current = match self.tree.get(&key)? {
                Some(bytes) => bytes,
                None => return Ok(UpdateResult { acknowledged: true, matched_count: 0, modified_count: 0 }),
            };
            let mut doc = decode_doc(&current)?;
            if !doc.apply(patch) {
                return Ok(UpdateResult { acknowledged: true, matched_count: 1, modified_count: 0 });
            }
            let value = encode_doc(&doc)?;
            match self.tree.compare_and_swap(&key, Some(&current), Some(value))? {
                Ok(()) => return Ok(UpdateResult { acknowledged: true, matched_count: 1, modified_count: 1 }),
                Err(_) => {
                    tracing::debug!(collection = %self.name, %id, "concurrent write, retrying update");
                    continue;
                }
            }
        }
    }

    fn scan_all(&self) -> Result<Vec<Document>, StoreError> {
        let mut docs = Vec::with_capacity(self.tree.len());
        for entry in self.tree.iter() {
            let (_key, value) = entry?;
            docs.push(decode_doc(&value)?);
        }
        Ok(docs)
    }
}
