use crate::document::DocId;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("a document with id {0} already exists")]
    DuplicateId(DocId),
    #[error("no document with id {0} was found")]
    NotFound(DocId),
    #[error("{0} operation was not acknowledged by the store")]
    Unacknowledged(&'static str),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CorpusError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(id) => CorpusError::DuplicateId(id),
            other => CorpusError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
