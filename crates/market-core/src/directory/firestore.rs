//! Document store REST client.
//!
//! Writes go through `:commit` so the creation timestamp can be set by a
//! server-side transform; reads go through `:runQuery` with a structured
//! query ordering the whole collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{Collection, DirectoryResult, Direction, OrderBy};
use crate::auth::{build_http_client, send_json};
use crate::config::DirectoryConfig;
use crate::models::{Document, DocumentId, FieldValue, Fields, CREATED_AT_FIELD};

#[derive(Clone)]
pub struct FirestoreClient {
    api_key: String,
    documents_url: String,
    documents_path: String,
    client: Client,
}

impl FirestoreClient {
    pub fn new(config: &DirectoryConfig) -> DirectoryResult<Self> {
        Ok(Self {
            api_key: config.api_key.clone(),
            documents_url: config.documents_url(),
            documents_path: config.documents_path(),
            client: build_http_client(config)?,
        })
    }

    /// Create a document with a fresh id and a server-assigned creation time.
    pub async fn create_document(
        &self,
        collection: Collection,
        mut fields: Fields,
        id_token: Option<&str>,
    ) -> DirectoryResult<DocumentId> {
        fields.remove(CREATED_AT_FIELD);
        let id = DocumentId::random();
        let body = commit_body(&self.documents_path, collection, &id, &fields)?;

        let request = self
            .client
            .post(format!("{}:commit", self.documents_url))
            .json(&body);
        let _: serde_json::Value = send_json(self.authorize(request, id_token)).await?;

        tracing::debug!("Created {}/{}", collection, id);
        Ok(id)
    }

    /// Fetch every document of `collection` in the requested order.
    pub async fn run_query(
        &self,
        collection: Collection,
        order: OrderBy,
        id_token: Option<&str>,
    ) -> DirectoryResult<Vec<Document>> {
        let body = query_body(collection, order);
        let request = self
            .client
            .post(format!("{}:runQuery", self.documents_url))
            .json(&body);
        let entries: Vec<RunQueryEntry> = send_json(self.authorize(request, id_token)).await?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| entry.document)
            .map(WireDocument::into_document)
            .collect())
    }

    fn authorize(&self, request: RequestBuilder, id_token: Option<&str>) -> RequestBuilder {
        let request = request.query(&[("key", self.api_key.as_str())]);
        match id_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn commit_body(
    documents_path: &str,
    collection: Collection,
    id: &DocumentId,
    fields: &Fields,
) -> DirectoryResult<serde_json::Value> {
    let mut wire_fields = serde_json::Map::new();
    for (name, value) in fields {
        wire_fields.insert(name.clone(), serde_json::to_value(WireValue::from(value))?);
    }

    Ok(serde_json::json!({
        "writes": [{
            "update": {
                "name": format!("{documents_path}/{collection}/{id}"),
                "fields": wire_fields,
            },
            "updateTransforms": [{
                "fieldPath": CREATED_AT_FIELD,
                "setToServerValue": "REQUEST_TIME",
            }],
            "currentDocument": { "exists": false },
        }]
    }))
}

fn query_body(collection: Collection, order: OrderBy) -> serde_json::Value {
    let direction = match order.direction {
        Direction::Ascending => "ASCENDING",
        Direction::Descending => "DESCENDING",
    };
    serde_json::json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection.as_str() }],
            "orderBy": [{
                "field": { "fieldPath": order.field },
                "direction": direction,
            }],
        }
    })
}

#[derive(Debug, Deserialize)]
struct RunQueryEntry {
    #[serde(default)]
    document: Option<WireDocument>,
}

#[derive(Debug, Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl WireDocument {
    fn into_document(self) -> Document {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        let fields = self
            .fields
            .into_iter()
            .filter_map(|(name, raw)| match serde_json::from_value::<WireValue>(raw) {
                Ok(value) => Some((name, value.into())),
                Err(error) => {
                    tracing::debug!("Skipping unsupported field '{}' on {}: {}", name, id, error);
                    None
                }
            })
            .collect();
        Document::new(DocumentId::from(id), fields)
    }
}

/// Typed value in the store's JSON encoding (`{"stringValue": "..."}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum WireValue {
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    #[serde(rename = "integerValue", with = "integer_string")]
    Integer(i64),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&FieldValue> for WireValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Null(()),
            FieldValue::Boolean(value) => Self::Boolean(*value),
            FieldValue::Integer(value) => Self::Integer(*value),
            FieldValue::Double(value) => Self::Double(*value),
            FieldValue::Timestamp(value) => Self::Timestamp(*value),
            FieldValue::String(value) => Self::String(value.clone()),
        }
    }
}

impl From<WireValue> for FieldValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null(()) => Self::Null,
            WireValue::Boolean(value) => Self::Boolean(value),
            WireValue::Integer(value) => Self::Integer(value),
            WireValue::Double(value) => Self::Double(value),
            WireValue::Timestamp(value) => Self::Timestamp(value),
            WireValue::String(value) => Self::String(value),
        }
    }
}

/// 64-bit integers travel as decimal strings.
mod integer_string {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => raw.parse().map_err(D::Error::custom),
            serde_json::Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| D::Error::custom("integer out of range")),
            other => Err(D::Error::custom(format!("expected integer, found {other}"))),
        }
    }
}
