pub mod filesystem;

use crate::error::{AuditError, Result};
use crate::types::config::ScanSettings;
use crate::types::Document;
use filesystem::{has_extension, list_files};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct LoadedSchema {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub document: Result<Document>,
}

/// Schema files under `root`, sorted by path.
pub fn discover(root: &Path, settings: &ScanSettings) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(AuditError::PathNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(AuditError::NotADirectory(root.display().to_string()));
    }

    let mut sources = list_files(root, settings.recursive)
        .into_iter()
        .filter(|path| has_extension(path, &settings.extension))
        .collect::<Vec<_>>();
    sources.sort();
    tracing::debug!(
        root = %root.display(),
        extension = %settings.extension,
        count = sources.len(),
        "discovered schema files"
    );
    Ok(sources)
}

pub fn load_schema(path: &Path) -> LoadedSchema {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let (size_bytes, document) = match std::fs::read(path) {
        Ok(bytes) => (bytes.len() as u64, parse_document(path, &bytes)),
        Err(e) => (0, Err(load_error(path, e.to_string()))),
    };
    if let Err(e) = &document {
        tracing::warn!(schema = %name, error = %e, "schema failed to load");
    }

    LoadedSchema {
        name,
        path: path.to_path_buf(),
        size_bytes,
        document,
    }
}

pub fn load_all(sources: &[PathBuf]) -> Vec<LoadedSchema> {
    sources.par_iter().map(|path| load_schema(path)).collect()
}

fn parse_document(path: &Path, bytes: &[u8]) -> Result<Document> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(load_error(
            path,
            format!("schema root must be a JSON object, found {}", kind(&other)),
        )),
        Err(e) => Err(load_error(path, e.to_string())),
    }
}

fn load_error(path: &Path, message: String) -> AuditError {
    AuditError::SchemaLoad {
        path: path.display().to_string(),
        message,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
