//! In-memory document storage backend for campus.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for
//! development, tests and local runs (`DATABASE_URL=memory://`).
//!
//! # Quick Start
//!
//! ```ignore
//! use campus_core::{backend::StoreBackendBuilder, store::DocumentStore};
//! use campus_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!     let students = store.typed_collection::<Student>();
//!
//!     assert!(students.all().await?.is_empty());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as campus_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
