//! Remote document store access.
//!
//! The record collections live in an externally managed document database;
//! this module exposes read-only, full-collection snapshots of it. Documents
//! are schema-less: callers receive plain JSON fields and decide how to
//! coerce them.

mod firestore_client;

pub use firestore_client::FirestoreClient;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// One document from the store, with its store-assigned id.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode store response: {0}")]
    Decode(String),
}

/// Read-only access to the document store.
///
/// This system never writes: the one operation is an unfiltered snapshot of a
/// collection, returned in store order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}
