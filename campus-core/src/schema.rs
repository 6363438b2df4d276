//! Declarative document schemas and write-time validation.
//!
//! A [`Schema`] is a static list of [`FieldSpec`]s. It carries no behavior
//! besides [`Schema::validate`], which checks a BSON document for missing
//! required fields, wrong value types and values outside an enumeration.
//!
//! # Example
//!
//! ```ignore
//! use campus_core::schema::{FieldKind, FieldSpec, Schema};
//!
//! static NAME: Schema = Schema { fields: &[
//!     FieldSpec::required("first", FieldKind::String),
//!     FieldSpec::optional("middle", FieldKind::String),
//! ] };
//!
//! static PERSON: Schema = Schema { fields: &[
//!     FieldSpec::required("name", FieldKind::Embedded(&NAME)),
//!     FieldSpec::required("status", FieldKind::Enum(&["active", "blocked"])),
//! ] };
//! ```

use bson::{Bson, Document as BsonDocument};
use std::fmt;
use thiserror::Error;

/// The static shape of a document.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

/// A single named field in a [`Schema`].
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// The accepted value shape of a field.
#[derive(Debug)]
pub enum FieldKind {
    /// Any string.
    String,
    /// A string drawn from a closed set of literals.
    Enum(&'static [&'static str]),
    /// A sub-document owned by its parent, validated against its own schema.
    Embedded(&'static Schema),
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

impl Schema {
    /// Validates `document` against this schema.
    ///
    /// Every violation is collected, nested ones reported with a dotted path
    /// such as `guardian.motherName`. Fields not named by the schema are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing each offending field.
    pub fn validate(&self, document: &Bson) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        match document {
            Bson::Document(doc) => self.check(doc, "", &mut errors),
            other => errors.push(FieldError::new(
                "",
                FieldErrorKind::Type { expected: "object", found: type_name(other) },
            )),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }

    fn check(&self, doc: &BsonDocument, prefix: &str, errors: &mut Vec<FieldError>) {
        for field in self.fields {
            let path = if prefix.is_empty() {
                field.name.to_string()
            } else {
                format!("{prefix}.{}", field.name)
            };

            let value = match doc.get(field.name) {
                None | Some(Bson::Null) => {
                    if field.required {
                        errors.push(FieldError::new(path, FieldErrorKind::Required));
                    }
                    continue;
                }
                Some(Bson::String(s)) if s.is_empty() && field.required => {
                    errors.push(FieldError::new(path, FieldErrorKind::Required));
                    continue;
                }
                Some(value) => value,
            };

            match (&field.kind, value) {
                (FieldKind::String, Bson::String(_)) => {}
                (FieldKind::Enum(allowed), Bson::String(s)) => {
                    if !allowed.contains(&s.as_str()) {
                        errors.push(FieldError::new(
                            path,
                            FieldErrorKind::Enum { value: s.clone(), allowed: *allowed },
                        ));
                    }
                }
                (FieldKind::Embedded(schema), Bson::Document(inner)) => {
                    schema.check(inner, &path, errors);
                }
                (FieldKind::String | FieldKind::Enum(_), other) => errors.push(FieldError::new(
                    path,
                    FieldErrorKind::Type { expected: "string", found: type_name(other) },
                )),
                (FieldKind::Embedded(_), other) => errors.push(FieldError::new(
                    path,
                    FieldErrorKind::Type { expected: "object", found: type_name(other) },
                )),
            }
        }
    }
}

fn type_name(value: &Bson) -> String {
    format!("{:?}", value.element_type())
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path of the offending field; empty for the document itself.
    pub path: String,
    pub kind: FieldErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    Required,
    Type { expected: &'static str, found: String },
    Enum { value: String, allowed: &'static [&'static str] },
    /// The document passed the schema but could not be read into its typed model.
    Malformed(String),
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self { path: path.into(), kind }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Required => write!(f, "Path `{}` is required.", self.path),
            FieldErrorKind::Type { expected, found } => write!(
                f,
                "Path `{}` must be of type {expected}, found {found}.",
                self.path
            ),
            FieldErrorKind::Enum { value, allowed } => write!(
                f,
                "`{value}` is not a valid enum value for path `{}` (expected one of: {}).",
                self.path,
                allowed.join(", ")
            ),
            FieldErrorKind::Malformed(reason) => write!(f, "{reason}"),
        }
    }
}

/// A document failed its schema. Holds every violation found.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed: {}", summarize(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `true` if some violation is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
