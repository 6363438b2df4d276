//! MongoDB backend implementation for campus.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//! Identities are MongoDB ObjectIds assigned on insertion and kept in `_id`.
//!
//! # Connection
//!
//! The builder takes a MongoDB connection string. The database is the one named
//! in the connection string unless overridden with
//! [`MongoDbStoreBuilder::database`], falling back to `test`. Building pings the
//! deployment, so a store that builds successfully has reached the server once.
//!
//! # Example
//!
//! ```ignore
//! use campus_core::backend::StoreBackendBuilder;
//! use campus_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017/campus")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as campus_mongodb;

pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
