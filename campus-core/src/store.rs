//! The store handle the rest of the service holds on to.
//!
//! A [`DocumentStore`] owns one backend behind a trait object, so the backend
//! can be picked at startup (MongoDB in production, in-memory for local runs
//! and tests) without the handle's type changing.
//!
//! ```ignore
//! let store = DocumentStore::new(InMemoryStore::new());
//! let students = store.typed_collection::<Student>();
//! ```

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    collection::TypedCollection,
    document::Document,
    error::DocumentStoreResult,
};

#[derive(Debug)]
pub struct DocumentStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DocumentStore {
    pub fn new<B: StoreBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Collection handle for `D`, named by `D::collection_name()`.
    pub fn typed_collection<D: Document>(&self) -> TypedCollection<'_, D> {
        TypedCollection::new(D::collection_name().to_string(), &*self.backend)
    }

    /// The backend as its concrete type, if it is a `B`.
    pub fn backend_as<B: StoreBackend + 'static>(&self) -> Option<&B> {
        self.backend.as_any().downcast_ref::<B>()
    }

    /// Closes the backend. Must be the last use of the store.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown_boxed().await
    }
}
