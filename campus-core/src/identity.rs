//! Store-assigned document identities.
//!
//! Every stored document is identified by an [`Identity`], a MongoDB ObjectId
//! regardless of which backend created it. On the wire it is the 24 character
//! lowercase hex form.

use bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Opaque, immutable identity of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(ObjectId);

impl Identity {
    /// Generates a fresh identity. Backends call this at insertion time.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses an identity from its hex form.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidIdentity`] unless `input` is exactly
    /// 24 hexadecimal characters.
    pub fn parse(input: &str) -> DocumentStoreResult<Self> {
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| {
                DocumentStoreError::InvalidIdentity(format!(
                    "`{input}` is not a 24 character hex string"
                ))
            })
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for Identity {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<Identity> for Bson {
    fn from(id: Identity) -> Self {
        Bson::ObjectId(id.0)
    }
}

impl TryFrom<&Bson> for Identity {
    type Error = DocumentStoreError;

    fn try_from(value: &Bson) -> DocumentStoreResult<Self> {
        match value {
            Bson::ObjectId(oid) => Ok(Self(*oid)),
            Bson::String(s) => Self::parse(s),
            other => Err(DocumentStoreError::InvalidIdentity(format!(
                "unsupported identity type {:?}",
                other.element_type()
            ))),
        }
    }
}

impl FromStr for Identity {
    type Err = DocumentStoreError;

    fn from_str(s: &str) -> DocumentStoreResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        Self::parse(&raw).map_err(de::Error::custom)
    }
}
