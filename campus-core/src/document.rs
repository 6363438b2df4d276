//! What a storable document is, and how it travels.
//!
//! A [`Document`] names its collection and its schema. [`Record`] pairs one
//! with the identity the store gave it. [`DocumentExt`] moves documents
//! between the typed model, BSON and JSON.

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value, to_value};

use crate::{error::DocumentStoreResult, identity::Identity, schema::Schema};

/// A type that can live in a collection.
///
/// A document does not carry its own identity; the store assigns one on
/// insertion and hands it back inside a [`Record`].
///
/// # Example
///
/// ```ignore
/// use campus_core::{document::Document, schema::{Schema, FieldSpec, FieldKind}};
/// use serde::{Serialize, Deserialize};
///
/// static USER: Schema = Schema { fields: &[FieldSpec::required("name", FieldKind::String)] };
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     pub name: String,
/// }
///
/// impl Document for User {
///     fn collection_name() -> &'static str {
///         "users"
///     }
///
///     fn schema() -> &'static Schema {
///         &USER
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Collection the document is stored in, e.g. `"students"`.
    fn collection_name() -> &'static str;

    /// Returns the schema every write of this document is validated against.
    fn schema() -> &'static Schema;
}

/// BSON and JSON conversions, implemented for every [`Document`].
///
/// Failures surface as [`DocumentStoreError::Serialization`](crate::error::DocumentStoreError::Serialization).
pub trait DocumentExt: Document {
    fn to_bson(&self) -> DocumentStoreResult<Bson>;

    fn from_bson(bson: Bson) -> DocumentStoreResult<Self>;

    fn to_json(&self) -> DocumentStoreResult<Value>;

    fn from_json(value: Value) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson(&self) -> DocumentStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

/// A stored document together with the identity the store assigned to it.
///
/// Serializes as the document's own fields with the identity beside them
/// under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<D> {
    #[serde(rename = "_id")]
    pub id: Identity,
    #[serde(flatten)]
    pub document: D,
}

impl<D> Record<D> {
    pub fn new(id: Identity, document: D) -> Self {
        Self { id, document }
    }
}
