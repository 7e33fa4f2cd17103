use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::core::config::StoreConfig;
use crate::modules::store::{Document, DocumentStore, StoreError};

/// Client for the Firestore REST API.
///
/// Collections are read with a single unfiltered request; there is no retry
/// and no page-token follow-up, so `StoreConfig::page_size` bounds what one
/// snapshot can see.
pub struct FirestoreClient {
    config: StoreConfig,
    http_client: reqwest::Client,
}

impl FirestoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/{}", self.config.documents_url(), collection);

        tracing::debug!("Listing documents from collection: {}", collection);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("pageSize", self.config.page_size.to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Store API error: HTTP {} - {}", status, body);
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list = response
            .json::<ListDocumentsResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(list
            .documents
            .into_iter()
            .map(WireDocument::into_document)
            .collect())
    }
}

/// Response from the document list endpoint
#[derive(Debug, Default, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
}

/// A document as the REST API returns it: full resource name plus typed values
#[derive(Debug, Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, WireValue>,
}

impl WireDocument {
    fn into_document(self) -> Document {
        let id = self
            .name
            .rsplit('/')
            .next()
            .map(str::to_string)
            .unwrap_or_default();

        let mut fields = Map::new();
        for (name, value) in self.fields {
            fields.insert(name, value.into_json());
        }

        Document { id, fields }
    }
}

/// The store's typed value wrapper, e.g. `{"stringValue": "Tsuru"}`.
///
/// Map values and explicit nulls decode to JSON null; the record fields this
/// dashboard reads are strings and string lists.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WireValue {
    string_value: Option<String>,
    // The wire format carries 64-bit integers as decimal strings
    integer_value: Option<String>,
    double_value: Option<f64>,
    boolean_value: Option<bool>,
    timestamp_value: Option<String>,
    array_value: Option<WireArray>,
}

#[derive(Debug, Default, Deserialize)]
struct WireArray {
    #[serde(default)]
    values: Vec<WireValue>,
}

impl WireValue {
    fn into_json(self) -> Value {
        if let Some(s) = self.string_value {
            Value::String(s)
        } else if let Some(arr) = self.array_value {
            Value::Array(arr.values.into_iter().map(WireValue::into_json).collect())
        } else if let Some(s) = self.timestamp_value {
            Value::String(s)
        } else if let Some(s) = self.integer_value {
            Value::String(s)
        } else if let Some(f) = self.double_value {
            serde_json::json!(f)
        } else if let Some(b) = self.boolean_value {
            Value::Bool(b)
        } else {
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_typed_values_into_plain_json() {
        let payload = r#"{
            "documents": [
                {
                    "name": "projects/demo/databases/(default)/documents/vales/a1b2c3",
                    "fields": {
                        "fecha": {"stringValue": "2024-05-03"},
                        "municipio": {"stringValue": "Atizapán"},
                        "fotos": {"arrayValue": {"values": [
                            {"stringValue": "https://img.example.com/1.jpg"}
                        ]}},
                        "kilometraje": {"integerValue": "42"},
                        "activo": {"booleanValue": true}
                    }
                }
            ]
        }"#;

        let list: ListDocumentsResponse = serde_json::from_str(payload).unwrap();
        let docs: Vec<Document> = list
            .documents
            .into_iter()
            .map(WireDocument::into_document)
            .collect();

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.id, "a1b2c3");
        assert_eq!(doc.fields["fecha"], Value::String("2024-05-03".into()));
        assert_eq!(doc.fields["municipio"], Value::String("Atizapán".into()));
        assert_eq!(
            doc.fields["fotos"],
            serde_json::json!(["https://img.example.com/1.jpg"])
        );
        assert_eq!(doc.fields["kilometraje"], Value::String("42".into()));
        assert_eq!(doc.fields["activo"], Value::Bool(true));
    }

    #[test]
    fn document_without_fields_decodes_to_empty_map() {
        let payload = r#"{
            "documents": [
                {"name": "projects/demo/databases/(default)/documents/vales/solo"}
            ]
        }"#;

        let list: ListDocumentsResponse = serde_json::from_str(payload).unwrap();
        let doc = list
            .documents
            .into_iter()
            .map(WireDocument::into_document)
            .next()
            .unwrap();

        assert_eq!(doc.id, "solo");
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn empty_collection_response_decodes_to_no_documents() {
        let list: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(list.documents.is_empty());
    }

    #[test]
    fn empty_array_value_decodes_to_empty_list() {
        let value: WireValue =
            serde_json::from_str(r#"{"arrayValue": {}}"#).unwrap();
        assert_eq!(value.into_json(), serde_json::json!([]));
    }
}
