//! Core building blocks for a small document-backed records service.
//!
//! This crate provides:
//!
//! - **Identities** ([`identity`]) - Store-assigned, immutable document identities
//! - **Schemas** ([`schema`]) - Declarative field descriptions and write-time validation
//! - **Document traits** ([`document`]) - Core traits for defining and serializing documents
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing different storage backends
//! - **Collections interface** ([`collection`]) - Typed create/list/lookup over one collection
//! - **Document store** ([`store`]) - Handle over a backend chosen at runtime
//! - **Error handling** ([`error`]) - Error taxonomy and result types
//!
//! # Example
//!
//! ```ignore
//! use campus_core::{document::Document, schema::{FieldKind, FieldSpec, Schema}};
//! use serde::{Serialize, Deserialize};
//!
//! static USER: Schema = Schema { fields: &[FieldSpec::required("name", FieldKind::String)] };
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub name: String,
//! }
//!
//! impl Document for User {
//!     fn collection_name() -> &'static str {
//!         "users"
//!     }
//!
//!     fn schema() -> &'static Schema {
//!         &USER
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as campus_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod identity;
pub mod schema;
pub mod store;
