//! The seam between the typed store and the place documents actually live.
//!
//! Backends implement [`StoreBackend`]. [`DynStoreBackend`] is its
//! object-safe twin, implemented for every backend, so a
//! [`DocumentStore`](crate::store::DocumentStore) can hold whichever one was
//! chosen at startup. [`StoreBackendBuilder`] opens a backend.

use async_trait::async_trait;
use bson::Bson;
use std::{any::Any, fmt::Debug};

use crate::{error::DocumentStoreResult, identity::Identity};

/// Raw document storage, keyed by collection and identity.
///
/// Backends only move documents in and out; schema validation happens before a
/// document reaches them. Documents are handed over without an identity and the
/// backend assigns one on insertion.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from
/// multiple async tasks. Backends do not serialize access on behalf of callers
/// beyond what their own storage requires.
///
/// # Error Handling
///
/// A lost or never-established connection must be reported as
/// [`DocumentStoreError::Unavailable`](crate::error::DocumentStoreError::Unavailable).
/// No backend retries a failed call.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a document into a collection and returns its newly assigned identity.
    ///
    /// # Arguments
    ///
    /// * `document` - The BSON document to store. Must not carry an `_id`.
    /// * `collection` - The name of the collection. Created automatically if it doesn't exist.
    async fn insert_document(&self, document: Bson, collection: &str) -> DocumentStoreResult<Identity>;

    /// Returns every document in a collection in store-native order.
    ///
    /// A collection that doesn't exist yields an empty vector.
    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>>;

    /// Retrieves a single document by identity, or `None` if no document has it.
    async fn find_document(
        &self,
        id: &Identity,
        collection: &str,
    ) -> DocumentStoreResult<Option<Bson>>;

    /// Releases connections. A no-op unless the backend holds any.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn insert_document(&self, document: Bson, collection: &str) -> DocumentStoreResult<Identity>;
    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>>;
    async fn find_document(
        &self,
        id: &Identity,
        collection: &str,
    ) -> DocumentStoreResult<Option<Bson>>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;

    fn as_any(&self) -> &dyn Any;
}

#[async_trait]
impl<B: StoreBackend + Send + Sync + 'static> DynStoreBackend for B {
    async fn insert_document(&self, document: Bson, collection: &str) -> DocumentStoreResult<Identity> {
        StoreBackend::insert_document(self, document, collection).await
    }

    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>> {
        StoreBackend::find_documents(self, collection).await
    }

    async fn find_document(
        &self,
        id: &Identity,
        collection: &str,
    ) -> DocumentStoreResult<Option<Bson>> {
        StoreBackend::find_document(self, id, collection).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(*self).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opens a backend, failing with
/// [`DocumentStoreError::Initialization`](crate::error::DocumentStoreError::Initialization)
/// if it can't be reached.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
