//! Solr documents
//!
//! A [`Document`] is a schemaless record: field names mapped to arbitrary JSON
//! values. Fields are looked up by name when the document is consumed, through
//! accessors that check the JSON type and fail instead of coercing.

use crate::error::{Error, Result};
use crate::types::{json_type_name, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// A single document returned by Solr
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: JsonObject,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check if a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over `(name, value)` pairs
    pub fn fields(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Raw value of a field, if present
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    /// Raw value of a field, failing if it is absent
    pub fn require(&self, field: &str) -> Result<&JsonValue> {
        self.get(field)
            .ok_or_else(|| Error::field(field, "is missing"))
    }

    /// Check if a field is present and explicitly null
    pub fn is_null(&self, field: &str) -> bool {
        matches!(self.get(field), Some(JsonValue::Null))
    }

    /// String field
    pub fn get_str(&self, field: &str) -> Result<&str> {
        let value = self.require(field)?;
        value.as_str().ok_or_else(|| type_mismatch(field, "a string", value))
    }

    /// Integer field (must fit in `i64`)
    pub fn get_i64(&self, field: &str) -> Result<i64> {
        let value = self.require(field)?;
        value
            .as_i64()
            .ok_or_else(|| type_mismatch(field, "an integer", value))
    }

    /// Non-negative integer field
    pub fn get_u64(&self, field: &str) -> Result<u64> {
        let value = self.require(field)?;
        value
            .as_u64()
            .ok_or_else(|| type_mismatch(field, "a non-negative integer", value))
    }

    /// Numeric field, integers included
    pub fn get_f64(&self, field: &str) -> Result<f64> {
        let value = self.require(field)?;
        value.as_f64().ok_or_else(|| type_mismatch(field, "a number", value))
    }

    /// Boolean field
    pub fn get_bool(&self, field: &str) -> Result<bool> {
        let value = self.require(field)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch(field, "a boolean", value))
    }

    /// List field (Solr multi-valued fields)
    pub fn get_array(&self, field: &str) -> Result<&[JsonValue]> {
        let value = self.require(field)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| type_mismatch(field, "a list", value))
    }

    /// Nested object field
    pub fn get_object(&self, field: &str) -> Result<&JsonObject> {
        let value = self.require(field)?;
        value
            .as_object()
            .ok_or_else(|| type_mismatch(field, "an object", value))
    }

    /// Human-readable rendering of a field
    ///
    /// Strings are returned as-is, lists of scalars are joined with `", "`,
    /// everything else is rendered as JSON text.
    pub fn display_value(&self, field: &str) -> Result<String> {
        let value = self.require(field)?;
        Ok(match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(items) if items.iter().all(is_scalar) => items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        })
    }
}

impl From<JsonObject> for Document {
    fn from(fields: JsonObject) -> Self {
        Self { fields }
    }
}

impl From<Document> for JsonValue {
    fn from(document: Document) -> Self {
        JsonValue::Object(document.fields)
    }
}

fn type_mismatch(field: &str, expected: &str, found: &JsonValue) -> Error {
    Error::field(
        field,
        format!("is not {expected} (found {})", json_type_name(found)),
    )
}

fn is_scalar(value: &JsonValue) -> bool {
    !matches!(value, JsonValue::Array(_) | JsonValue::Object(_))
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
