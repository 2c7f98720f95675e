//! Decoder implementations
//!
//! The select decoder takes the response apart by hand instead of through a
//! derived struct so that every shape violation gets its own message.

use super::types::Page;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::types::json_type_name;
use serde_json::{Map, Value};

// ============================================================================
// Select Decoder
// ============================================================================

/// Decoder for cursor pages of the Solr select handler (`wt=json`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectDecoder;

impl SelectDecoder {
    /// Create a new select decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a response body into a page
    pub fn decode(&self, body: &str) -> Result<Page> {
        let value = self.decode_raw(body)?;
        self.extract_page(value)
    }

    /// Decode a response body into a JSON value without checking its shape
    pub fn decode_raw(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }

    /// Extract documents, next cursor mark and match count from a decoded body
    pub fn extract_page(&self, value: Value) -> Result<Page> {
        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::protocol(format!(
                    "response body is not an object (found {})",
                    json_type_name(&other)
                )))
            }
        };

        let mut response = match root.remove("response") {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(Error::protocol(format!(
                    "'response' is not an object (found {})",
                    json_type_name(&other)
                )))
            }
            None => return Err(Error::protocol("missing 'response' field")),
        };

        let documents = match response.remove("docs") {
            Some(Value::Array(docs)) => convert_documents(docs)?,
            Some(other) => {
                return Err(Error::protocol(format!(
                    "'response.docs' is not a list (found {})",
                    json_type_name(&other)
                )))
            }
            None => return Err(Error::protocol("missing 'response.docs' field")),
        };

        let next_cursor_mark = match root.remove("nextCursorMark") {
            Some(Value::String(mark)) => mark,
            Some(other) => {
                return Err(Error::protocol(format!(
                    "'nextCursorMark' is not a string (found {})",
                    json_type_name(&other)
                )))
            }
            None => return Err(Error::protocol("missing 'nextCursorMark' field")),
        };

        Ok(Page {
            documents,
            next_cursor_mark,
            num_found: num_found(&response),
        })
    }
}

/// Convert raw list elements into documents, rejecting non-objects
fn convert_documents(docs: Vec<Value>) -> Result<Vec<Document>> {
    docs.into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(map) => Ok(Document::from(map)),
            other => Err(Error::protocol(format!(
                "element {index} of 'response.docs' is not an object (found {})",
                json_type_name(&other)
            ))),
        })
        .collect()
}

/// `numFound` is informational, so a missing or odd value is ignored
fn num_found(response: &Map<String, Value>) -> Option<u64> {
    response.get("numFound").and_then(Value::as_u64)
}
