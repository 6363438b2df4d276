//! Application state shared across all request handlers.

use std::sync::Arc;

use campus_core::store::DocumentStore;

/// Shared resources handed to every handler through Axum's state extraction.
///
/// Cloning is cheap; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store the persistence gateway runs against.
    pub store: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }
}
