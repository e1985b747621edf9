use axum::extract::FromRef;
use homeval_artifacts::ArtifactBundle;
use homeval_audit::AuditLog;
use homeval_domain::config::ApiConfig;
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: String },
}

/// The immutable per-process context handlers read from.
///
/// Constructed once at startup, after the artifact cold start, and passed by
/// reference into every request. Nothing here is mutated after build, so the
/// state is safe for unlimited concurrent readers.
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub artifacts: ArtifactBundle,
    pub audit: AuditLog,
}

#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for ArtifactBundle {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.artifacts.clone()
    }
}

impl FromRef<ApiState> for AuditLog {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.audit.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    artifacts: Option<ArtifactBundle>,
    audit: Option<AuditLog>,
}

impl ApiStateBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn artifacts(mut self, artifacts: ArtifactBundle) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns an error when the configuration or artifact bundle is missing;
    /// the audit log defaults to disabled.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".to_owned(),
        })?;
        let artifacts = self.artifacts.ok_or_else(|| ApiStateError::Validation {
            message: "ArtifactBundle not provided".to_owned(),
        })?;
        let audit = self.audit.unwrap_or_default();

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, artifacts, audit }) })
    }
}
