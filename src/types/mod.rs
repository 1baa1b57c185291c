pub mod config;
pub mod principle;
pub mod report;

/// A parsed schema document: the JSON object at the root of a schema file.
pub type Document = serde_json::Map<String, serde_json::Value>;
