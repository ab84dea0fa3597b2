//! Catalog records as the pipeline sees them.
//!
//! A search batch is fetched once as `RawRecord`s and projected twice:
//! strictly into `CatalogItem` for clients, permissively into grounding
//! lines for the model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder rendered instead of a missing description.
pub const NO_DESCRIPTION: &str = "No description";

/// A product as surfaced to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub sku_id: Option<String>,
    pub title: String,
    /// Smallest currency unit.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub features: Option<Map<String, Value>>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogItem {
    /// Text embedded in document mode when the item is indexed:
    /// title, feature attributes, category.
    pub fn embedding_text(&self) -> String {
        let attributes: Vec<&str> = self
            .features
            .as_ref()
            .and_then(|f| f.get("attributes"))
            .and_then(|a| a.as_array())
            .map(|list| list.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        format!(
            "{} {} {}",
            self.title,
            attributes.join(", "),
            self.category.as_deref().unwrap_or("")
        )
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected non-empty string or integer id, got {}",
            other
        ))),
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("record has invalid shape: {0}")]
    InvalidShape(String),
}

/// One record exactly as the search service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Strict projection used for the client-visible item list.
    pub fn validate(&self) -> Result<CatalogItem, RecordError> {
        let obj = self.0.as_object().ok_or(RecordError::NotAnObject)?;
        for field in ["id", "title"] {
            let present = match obj.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(RecordError::MissingField(field));
            }
        }

        serde_json::from_value(self.0.clone())
            .map_err(|e| RecordError::InvalidShape(e.to_string()))
    }

    /// Permissive projection handed to the model as grounding context.
    /// Never fails; missing fields render as placeholders.
    pub fn grounding_line(&self) -> String {
        let title = match self.0.get("title") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => "Untitled product".to_string(),
        };
        let price = match self.0.get("price") {
            Some(Value::Null) | None => "n/a".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let description = match self.0.get("description") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => NO_DESCRIPTION.to_string(),
        };

        format!("- {} (Price: {}): {}", title, price, description)
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
