use crate::store::{SledCollection, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "doccorpse";
pub const DEFAULT_COLLECTION: &str = "documents";

/// Where the database lives and which collection to use when none is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub db_path: PathBuf,
    pub collection: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { db_path: PathBuf::from(DEFAULT_DATABASE), collection: DEFAULT_COLLECTION.to_string() }
    }
}

impl CorpusConfig {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self { db_path: db_path.as_ref().to_path_buf(), ..Self::default() }
    }

    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    /// The requested collection name, falling back to the configured default.
    pub fn collection_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(name) if !name.is_empty() => name,
            _ => &self.collection,
        }
    }
}

/// An open database. Collections are resolved from it by name.
pub struct Database {
    db: sled::Db,
    config: CorpusConfig,
}

impl Database {
    pub fn open(config: CorpusConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path)?;
        tracing::debug!(path = %config.db_path.display(), "opened database");
        Ok(Self { db, config })
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn collection(&self, name: &str) -> Result<SledCollection, StoreError> {
        let tree = self.db.open_tree(name)?;
        Ok(SledCollection::new(name, tree))
    }

    /// Resolve `requested`, or the configured default collection when it is `None`.
    pub fn resolve(&self, requested: Option<&str>) -> Result<SledCollection, StoreError> {
        self.collection(self.config.collection_name(requested))
    }

    pub fn default_collection(&self) -> Result<SledCollection, StoreError> {
        self.resolve(None)
    }

    /// Names of the collections that exist in this database, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let default_tree: &[u8] = b"__sled__default";
        let mut names: Vec<String> = self
            .db
            .tree_names()
            .into_iter()
            .filter(|name| &name[..] != default_tree)
            .map(|name| String::from_utf8_lossy(&name).into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn flush(&self) -> Result<usize, StoreError> {
        Ok(self.db.flush()?)
    }
}
