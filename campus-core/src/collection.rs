//! Typed collection access.
//!
//! A [`TypedCollection`] binds a [`Document`] type to its collection on a
//! backend. Every write is validated against the document's schema before the
//! backend sees it, and every read hands back [`Record`]s carrying the
//! store-assigned identity.
//!
//! # Example
//!
//! ```ignore
//! let users = store.typed_collection::<User>();
//!
//! let created = users.insert(User { name: "Alice".to_string() }).await?;
//! let found = users.get(&created.id.to_hex()).await?;
//! assert_eq!(found, Some(created));
//! ```

use bson::Bson;
use std::marker::PhantomData;

use crate::{
    backend::DynStoreBackend,
    document::{Document, DocumentExt, Record},
    error::{DocumentStoreError, DocumentStoreResult},
    identity::Identity,
    schema::{FieldError, FieldErrorKind, ValidationError},
};

#[derive(Debug)]
pub struct TypedCollection<'a, D: Document> {
    name: String,
    backend: &'a dyn DynStoreBackend,
    _marker: PhantomData<D>,
}

impl<'a, D: Document> TypedCollection<'a, D> {
    pub(crate) fn new(name: String, backend: &'a dyn DynStoreBackend) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates and stores a document, returning it with its new identity.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Validation`] without touching the backend
    /// if the document breaks its schema, or whatever the backend reports.
    pub async fn insert(&self, document: D) -> DocumentStoreResult<Record<D>> {
        let bson = document.to_bson()?;
        D::schema().validate(&bson)?;

        let id = self
            .backend
            .insert_document(bson, self.name())
            .await?;

        Ok(Record::new(id, document))
    }

    /// Validates an untyped payload, reads it into `D` and stores it.
    ///
    /// Fields the schema doesn't name are dropped, since only the typed model
    /// is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Validation`] without touching the backend
    /// if the payload breaks the schema or can't be read as `D`.
    pub async fn insert_raw(&self, document: Bson) -> DocumentStoreResult<Record<D>> {
        D::schema().validate(&document)?;

        let typed = D::from_bson(document).map_err(|err| {
            DocumentStoreError::Validation(ValidationError::single(FieldError::new(
                "",
                FieldErrorKind::Malformed(err.to_string()),
            )))
        })?;

        self.insert(typed).await
    }

    /// Returns every document in the collection, in store-native order.
    pub async fn all(&self) -> DocumentStoreResult<Vec<Record<D>>> {
        self.backend
            .find_documents(self.name())
            .await?
            .into_iter()
            .map(|(id, doc)| D::from_bson(doc).map(|d| Record::new(id, d)))
            .collect()
    }

    /// Looks a document up by the textual form of its identity.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidIdentity`] without contacting the
    /// backend if `id` is not a valid identity.
    pub async fn get(&self, id: &str) -> DocumentStoreResult<Option<Record<D>>> {
        let id = Identity::parse(id)?;

        self.find(&id).await
    }

    /// Looks a document up by identity. Absence is `Ok(None)`.
    pub async fn find(&self, id: &Identity) -> DocumentStoreResult<Option<Record<D>>> {
        self.backend
            .find_document(id, self.name())
            .await?
            .map(|doc| D::from_bson(doc).map(|d| Record::new(*id, d)))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::StoreBackend,
        schema::{FieldKind, FieldSpec, Schema},
        store::DocumentStore,
    };
    use async_trait::async_trait;
    use bson::doc;
    use serde::{Deserialize, Serialize};
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    static PET: Schema = Schema {
        fields: &[
            FieldSpec::required("name", FieldKind::String),
            FieldSpec::required("kind", FieldKind::Enum(&["cat", "dog"])),
        ],
    };

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Pet {
        name: String,
        kind: String,
    }

    impl Document for Pet {
        fn collection_name() -> &'static str {
            "pets"
        }

        fn schema() -> &'static Schema {
            &PET
        }
    }

    #[derive(Debug, Default)]
    struct VecBackend {
        docs: Mutex<Vec<(Identity, Bson)>>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl StoreBackend for VecBackend {
        async fn insert_document(&self, document: Bson, _collection: &str) -> DocumentStoreResult<Identity> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = Identity::generate();
            self.docs.lock().unwrap().push((id, document));
            Ok(id)
        }

        async fn find_documents(&self, _collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.docs.lock().unwrap().clone())
        }

        async fn find_document(&self, id: &Identity, _collection: &str) -> DocumentStoreResult<Option<Bson>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .docs
                .lock()
                .unwrap()
                .iter()
                .find(|(i, _)| i == id)
                .map(|(_, d)| d.clone()))
        }
    }

    fn tom() -> Pet {
        Pet { name: "Tom".to_string(), kind: "cat".to_string() }
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_document() {
        let store = DocumentStore::new(VecBackend::default());
        let pets = store.typed_collection::<Pet>();

        let created = pets.insert(tom()).await.unwrap();
        let found = pets.get(&created.id.to_hex()).await.unwrap();

        assert_eq!(pets.name(), "pets");
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn invalid_document_is_not_written() {
        let store = DocumentStore::new(VecBackend::default());
        let pets = store.typed_collection::<Pet>();

        let err = pets
            .insert(Pet { name: "Nemo".to_string(), kind: "fish".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::Validation(ref v) if v.has_path("kind")));
        assert!(pets.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn raw_insert_validates_before_reading() {
        let store = DocumentStore::new(VecBackend::default());
        let pets = store.typed_collection::<Pet>();

        let err = pets
            .insert_raw(Bson::Document(doc! { "kind": "dog" }))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::Validation(ref v) if v.has_path("name")));

        let created = pets
            .insert_raw(Bson::Document(doc! { "name": "Rex", "kind": "dog", "color": "brown" }))
            .await
            .unwrap();
        assert_eq!(created.document, Pet { name: "Rex".to_string(), kind: "dog".to_string() });
    }

    #[tokio::test]
    async fn unknown_identity_is_absent() {
        let store = DocumentStore::new(VecBackend::default());
        let pets = store.typed_collection::<Pet>();
        pets.insert(tom()).await.unwrap();

        let found = pets.find(&Identity::generate()).await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn malformed_identity_never_reaches_backend() {
        let backend = VecBackend::default();
        let calls = backend.calls.clone();
        let store = DocumentStore::new(backend);
        let pets = store.typed_collection::<Pet>();

        let err = pets.get("definitely-not-an-id").await.unwrap_err();

        assert!(matches!(err, DocumentStoreError::InvalidIdentity(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
