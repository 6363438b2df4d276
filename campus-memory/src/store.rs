//! Process-local storage: one map per collection, all behind a single
//! async read-write lock. Nothing survives a restart.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::Bson;
use campus_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::DocumentStoreResult,
    identity::Identity,
};
use mea::rwlock::RwLock;

type Collections = HashMap<String, HashMap<Identity, Bson>>;

/// Backend that keeps documents in memory.
///
/// Clones are handles onto the same data, so a clone can be kept around to
/// inspect what a store under test has written.
///
/// ```ignore
/// let store = InMemoryStore::new();
/// let id = store.insert_document(Bson::Document(doc! { "name": "Alice" }), "users").await?;
///
/// assert!(store.find_document(&id, "users").await?.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;

        collections.get(collection).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, document: Bson, collection: &str) -> DocumentStoreResult<Identity> {
        let id = Identity::generate();
        let mut collections = self.collections.write().await;

        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id, document);

        Ok(id)
    }

    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>> {
        let collections = self.collections.read().await;

        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents.iter().map(|(id, doc)| (*id, doc.clone())).collect())
    }

    async fn find_document(&self, id: &Identity, collection: &str) -> DocumentStoreResult<Option<Bson>> {
        let collections = self.collections.read().await;

        Ok(collections.get(collection).and_then(|documents| documents.get(id)).cloned())
    }
}

/// Opens an empty [`InMemoryStore`]. Never fails.
#[derive(Debug, Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
