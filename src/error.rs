use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid principle '{name}': {reason}")]
    InvalidPrinciple { name: String, reason: String },

    #[error("failed to load schema {path}: {message}")]
    SchemaLoad { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
