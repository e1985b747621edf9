use axum::http::StatusCode;
use homeval_artifacts::ArtifactError;
use thiserror::Error;

/// Inference slice error type.
///
/// Validation failures are user-caused and map to 400; everything else is an
/// internal fault and maps to 500. Audit failures never surface here: they
/// are logged and swallowed after a successful prediction.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<String>),

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error: {0}")]
    Artifact(#[from] ArtifactError),
}

impl InferenceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// HTTP status the error maps to at the handler boundary.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Artifact(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
