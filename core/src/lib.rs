pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod ops;
pub mod store;
pub mod tokenizer;

pub use config::{CorpusConfig, Database};
pub use document::{DocId, Document, DocumentPatch, NewDocument};
pub use error::{CorpusError, Result};
pub use index::InvertedIndex;
pub use ops::UpdateStatus;
pub use store::DocumentStore;
pub use tokenizer::{TermStat, TextStats};
