use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::records::models::RecordRow;
use crate::features::records::schema::RecordSchema;
use crate::modules::store::DocumentStore;

/// Loads record working sets from the remote store.
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// One unfiltered snapshot of the schema's collection, normalized into
    /// rows in store order.
    ///
    /// A store failure propagates; an empty collection legitimately yields an
    /// empty working set.
    pub async fn working_set(&self, schema: &RecordSchema) -> Result<Vec<RecordRow>> {
        let documents = self
            .store
            .list_documents(schema.collection)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load collection '{}': {}", schema.collection, e);
                AppError::Store(e)
            })?;

        let rows: Vec<RecordRow> = documents
            .iter()
            .map(|doc| RecordRow::from_document(schema, doc))
            .collect();

        tracing::info!("Loaded {} records from '{}'", rows.len(), schema.collection);

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::schema::VALES;
    use crate::shared::test_helpers::{doc, FailingStore, StubStore};
    use serde_json::json;

    #[tokio::test]
    async fn working_set_preserves_store_order() {
        let store = StubStore {
            documents: vec![
                doc("b", json!({ "fecha": "2024-02-01" })),
                doc("a", json!({ "fecha": "2024-01-01" })),
            ],
        };
        let service = RecordService::new(Arc::new(store));

        let rows = service.working_set(&VALES).await.unwrap();

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn empty_collection_yields_empty_working_set() {
        let service = RecordService::new(Arc::new(StubStore { documents: vec![] }));

        let rows = service.working_set(&VALES).await.unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_an_error_not_an_empty_set() {
        let service = RecordService::new(Arc::new(FailingStore));

        let result = service.working_set(&VALES).await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
