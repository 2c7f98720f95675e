//! Common types used throughout solr-cursor
//!
//! Shared type aliases and small helpers used across multiple modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Solr Constants
// ============================================================================

/// Cursor mark that starts a walk from the first result
pub const START_CURSOR_MARK: &str = "*";

/// Query matching every document of a collection
pub const MATCH_ALL_QUERY: &str = "*:*";

/// Default number of documents requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default sort expression
pub const DEFAULT_SORT: &str = "id asc";

/// Default Solr port
pub const DEFAULT_PORT: u16 = 8983;

// ============================================================================
// Helpers
// ============================================================================

/// Name of the JSON type of `value`, for error messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}
