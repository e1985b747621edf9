use thiserror::Error;

/// A specialized error enum for artifact retrieval and loading.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found in store: {key}")]
    NotFound { key: String },

    #[error("Fetch failed for artifact {key}: {source}")]
    Http { key: String, source: reqwest::Error },

    #[error("Hardware I/O failure ({context}): {source}")]
    Io { source: std::io::Error, context: String },

    #[error("Malformed artifact {key}: {source}")]
    Malformed { key: String, source: serde_json::Error },

    #[error("Model/schema mismatch: {message}")]
    SchemaMismatch { message: String },

    #[error("Artifact loader misconfigured: {message}")]
    Misconfigured { message: String },
}

impl ArtifactError {
    pub(crate) fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io { source, context: context.into() }
    }
}
