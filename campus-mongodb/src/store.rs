use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, Bson, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as DriverError, ErrorKind},
    options::ClientOptions,
};
use campus_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    identity::Identity,
};

/// Database used when neither the builder nor the connection string names one.
const DEFAULT_DATABASE: &str = "test";


#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn prepare_document(&self, document: Bson) -> DocumentStoreResult<Document> {
        match document {
            Bson::Document(mut doc) => {
                doc.remove("_id");
                Ok(doc)
            }
            other => Err(DocumentStoreError::Serialization(format!(
                "Expected document, found {:?}",
                other.element_type()
            ))),
        }
    }

    fn restore_document(&self, mut document: Document) -> DocumentStoreResult<(Identity, Bson)> {
        let id = document
            .remove("_id")
            .ok_or_else(|| DocumentStoreError::Backend("Stored document has no _id".into()))
            .and_then(|id| {
                Identity::try_from(&id).map_err(|e| DocumentStoreError::Backend(e.to_string()))
            })?;

        Ok((id, Bson::Document(document)))
    }
}

/// Maps a driver error onto the store taxonomy. Connectivity failures become
/// [`DocumentStoreError::Unavailable`]; everything else is a backend error.
pub(crate) fn map_driver_error(err: DriverError) -> DocumentStoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => DocumentStoreError::Unavailable(err.to_string()),
        _ => DocumentStoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_document(&self, document: Bson, collection: &str) -> DocumentStoreResult<Identity> {
        let result = self.get_collection(collection)
            .insert_one(self.prepare_document(document)?)
            .await
            .map_err(map_driver_error)?;

        Identity::try_from(&result.inserted_id)
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<(Identity, Bson)>> {
        self.get_collection(collection)
            .find(doc! {})
            .await
            .map_err(map_driver_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(map_driver_error)?
            .into_iter()
            .map(|doc| self.restore_document(doc))
            .collect()
    }

    async fn find_document(&self, id: &Identity, collection: &str) -> DocumentStoreResult<Option<Bson>> {
        self.get_collection(collection)
            .find_one(doc! { "_id": id.object_id() })
            .await
            .map_err(map_driver_error)?
            .map(|doc| self.restore_document(doc).map(|(_, body)| body))
            .transpose()
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: Option<String>,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: None,
        }
    }

    /// Overrides the database named in the connection string.
    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    /// Connects and pings the deployment, so an unreachable server fails here
    /// rather than on the first request.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        let database = self
            .database
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        client
            .database(&database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        Ok(MongoDbStore::new(client, database))
    }
}
