use crate::constants::{COLUMNS_KEY, LOCATION_ENCODING_KEY, MODEL_KEY};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub audit: AuditConfig,
    pub validation: ValidationConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Where model artifacts are fetched from and where they are cached.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub source: ArtifactSource,
    pub cache_dir: PathBuf,
    pub model_key: String,
    pub columns_key: String,
    pub location_encoding_key: String,
}

/// The durable store model artifacts are downloaded from on cold start.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSource {
    /// Blob store reachable over HTTP(S); keys are appended to `base_url`.
    Http { base_url: String },
    /// Local directory; keys are resolved relative to `path`.
    Dir { path: PathBuf },
}

/// Append-only request log. Disabled when `path` is unset.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub path: Option<PathBuf>,
}

/// Payload validation knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub policy: ValidationPolicy,
}

/// The validation ruleset applied to incoming payloads.
///
/// Selected at deployment time; both policies share the required-field and
/// non-empty-string checks and differ only in numeric ranges.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Positivity checks only.
    Lenient,
    /// Ranged checks plus cross-field rules (bath vs. BHK, area per room).
    #[default]
    Strict,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4710, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            source: ArtifactSource::default(),
            cache_dir: PathBuf::from("artifacts"),
            model_key: MODEL_KEY.to_owned(),
            columns_key: COLUMNS_KEY.to_owned(),
            location_encoding_key: LOCATION_ENCODING_KEY.to_owned(),
        }
    }
}

impl Default for ArtifactSource {
    fn default() -> Self {
        Self::Dir { path: PathBuf::from(".") }
    }
}
