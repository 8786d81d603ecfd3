//! Document store facade.
//!
//! A collection is anything that can store, delete, update and scan
//! documents keyed by [`DocId`]. Results mirror what a document database
//! reports back: an acknowledgement flag plus affected-document counts.

use crate::document::{DocId, Document, DocumentPatch};
use thiserror::Error;

pub mod disk;
pub mod memory;

pub use disk::SledCollection;
pub use memory::MemoryCollection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a document with id {0} already exists")]
    DuplicateKey(DocId),
    #[error("storage error: {0}")]
    Sled(#[from] sled::Error),
    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertResult {
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

pub trait DocumentStore {
    /// Collection name, used in log lines.
    fn name(&self) -> &str;
    /// Insert a new document. An existing id is [`StoreError::DuplicateKey`].
    fn store_one(&self, doc: &Document) -> Result<InsertResult, StoreError>;
    fn delete_one(&self, id: &DocId) -> Result<DeleteResult, StoreError>;
    /// Replace every non-id field of the matching document.
    fn update_one(&self, id: &DocId, patch: &DocumentPatch) -> Result<UpdateResult, StoreError>;
    fn scan_all(&self) -> Result<Vec<Document>, StoreError>;
}
