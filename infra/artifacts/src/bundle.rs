//! Cold-start loading of the three model artifacts into one immutable bundle.

use crate::error::ArtifactError;
use crate::model::{LinearModel, Regressor};
use crate::schema::{ColumnSchema, LocationEncoding};
use crate::store::{ArtifactStore, from_config};
use homeval_domain::config::ArtifactsConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::info;

#[derive(Debug)]
struct BundleInner {
    model: Box<dyn Regressor>,
    columns: ColumnSchema,
    locations: LocationEncoding,
}

/// The cached model artifacts, loaded once per process lifetime.
///
/// Immutable after load and internally reference-counted; clone freely into
/// request handlers. Safe for unlimited concurrent readers, no locking.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    inner: Arc<BundleInner>,
}

impl ArtifactBundle {
    #[must_use = "The bundle is not loaded until you call .load()"]
    pub fn builder() -> ArtifactBundleBuilder {
        ArtifactBundleBuilder::default()
    }

    /// Assembles a bundle from already-loaded parts.
    ///
    /// # Errors
    /// Returns [`ArtifactError::SchemaMismatch`] when the model's expected
    /// feature count differs from the schema length.
    pub fn from_parts(
        model: Box<dyn Regressor>,
        columns: ColumnSchema,
        locations: LocationEncoding,
    ) -> Result<Self, ArtifactError> {
        if model.num_features() != columns.len() {
            return Err(ArtifactError::SchemaMismatch {
                message: format!(
                    "model expects {} features but schema has {} columns",
                    model.num_features(),
                    columns.len()
                ),
            });
        }
        Ok(Self { inner: Arc::new(BundleInner { model, columns, locations }) })
    }

    #[must_use]
    pub fn model(&self) -> &dyn Regressor {
        self.inner.model.as_ref()
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSchema {
        &self.inner.columns
    }

    #[must_use]
    pub fn locations(&self) -> &LocationEncoding {
        &self.inner.locations
    }
}

/// A fluent builder that fetches and deserializes the artifact bundle.
#[must_use = "builders do nothing unless you call .load()"]
#[derive(Debug)]
pub struct ArtifactBundleBuilder {
    store: Option<Box<dyn ArtifactStore>>,
    cache_dir: PathBuf,
    model_key: String,
    columns_key: String,
    location_encoding_key: String,
}

impl Default for ArtifactBundleBuilder {
    fn default() -> Self {
        let defaults = ArtifactsConfig::default();
        Self {
            store: None,
            cache_dir: defaults.cache_dir,
            model_key: defaults.model_key,
            columns_key: defaults.columns_key,
            location_encoding_key: defaults.location_encoding_key,
        }
    }
}

impl ArtifactBundleBuilder {
    /// Applies the full artifacts section of the service configuration.
    pub fn config(mut self, cfg: &ArtifactsConfig) -> Self {
        self.store = Some(from_config(&cfg.source));
        self.cache_dir.clone_from(&cfg.cache_dir);
        self.model_key.clone_from(&cfg.model_key);
        self.columns_key.clone_from(&cfg.columns_key);
        self.location_encoding_key.clone_from(&cfg.location_encoding_key);
        self
    }

    /// Sets the durable store artifacts are fetched from.
    pub fn store(mut self, store: Box<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the local cache directory for fetched blobs.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn model_key(mut self, key: impl Into<String>) -> Self {
        self.model_key = key.into();
        self
    }

    pub fn columns_key(mut self, key: impl Into<String>) -> Self {
        self.columns_key = key.into();
        self
    }

    pub fn location_encoding_key(mut self, key: impl Into<String>) -> Self {
        self.location_encoding_key = key.into();
        self
    }

    /// Fetches all three artifacts into the cache and loads them into memory.
    ///
    /// Fetching skips blobs already present in the cache, so redundant cold
    /// starts only pay for the missing downloads.
    ///
    /// # Errors
    /// Fails when a blob cannot be fetched, a cached file cannot be read or
    /// parsed, or the model's feature count disagrees with the schema.
    pub async fn load(self) -> Result<ArtifactBundle, ArtifactError> {
        let store = self.store.ok_or_else(|| ArtifactError::Misconfigured {
            message: "artifact store not configured".to_owned(),
        })?;

        info!(cache_dir = %self.cache_dir.display(), "Cold start: loading model artifacts");

        let model: LinearModel =
            fetch_and_parse(store.as_ref(), &self.model_key, &self.cache_dir).await?;
        let columns: ColumnSchema =
            fetch_and_parse(store.as_ref(), &self.columns_key, &self.cache_dir).await?;
        let locations: LocationEncoding =
            fetch_and_parse(store.as_ref(), &self.location_encoding_key, &self.cache_dir).await?;

        info!(
            columns = columns.len(),
            locations = locations.len(),
            "Model loaded"
        );

        ArtifactBundle::from_parts(Box::new(model), columns, locations)
    }
}

async fn fetch_and_parse<T: DeserializeOwned>(
    store: &dyn ArtifactStore,
    key: &str,
    cache_dir: &Path,
) -> Result<T, ArtifactError> {
    let dest = cache_dir.join(key);
    store.fetch(key, &dest).await?;

    let bytes = fs::read(&dest)
        .await
        .map_err(|e| ArtifactError::io(e, format!("read cached artifact {}", dest.display())))?;

    serde_json::from_slice(&bytes)
        .map_err(|source| ArtifactError::Malformed { key: key.to_owned(), source })
}
