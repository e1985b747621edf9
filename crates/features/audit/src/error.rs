use thiserror::Error;

/// Audit slice error type.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Audit I/O failure ({context}): {source}")]
    Io { source: std::io::Error, context: String },
}
