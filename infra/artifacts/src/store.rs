//! Durable artifact stores with fetch-if-absent semantics.
//!
//! A store exposes exactly one operation: fetch a blob by key into a local
//! path, skipping the download when the file is already cached. Cache writes
//! are atomic (temp file, fsync, rename), so a redundant fetch by a
//! concurrent cold start can never leave a partially written artifact;
//! last-writer-wins is acceptable since all writers fetch identical bytes.

use crate::error::ArtifactError;
use async_trait::async_trait;
use homeval_domain::config::ArtifactSource;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A durable store exposing "fetch blob by key into local path if absent".
#[async_trait]
pub trait ArtifactStore: Debug + Send + Sync {
    /// Fetches the blob `key` into `dest` unless `dest` already exists.
    async fn fetch(&self, key: &str, dest: &Path) -> Result<(), ArtifactError>;
}

/// Constructs the store described by the configuration.
#[must_use]
pub fn from_config(source: &ArtifactSource) -> Box<dyn ArtifactStore> {
    match source {
        ArtifactSource::Http { base_url } => Box::new(HttpArtifactStore::new(base_url)),
        ArtifactSource::Dir { path } => Box::new(DirArtifactStore::new(path)),
    }
}

/// Blob store reachable over HTTP(S); keys are appended to the base URL.
#[derive(Debug, Clone)]
pub struct HttpArtifactStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArtifactStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client: reqwest::Client::new(), base_url }
    }
}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<(), ArtifactError> {
        if fs::try_exists(dest).await.unwrap_or(false) {
            debug!(key, dest = %dest.display(), "Artifact already cached, skipping download");
            return Ok(());
        }

        let url = format!("{}/{key}", self.base_url);
        info!(key, url, "Downloading artifact");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| ArtifactError::Http { key: key.to_owned(), source })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ArtifactError::Http { key: key.to_owned(), source })?;

        write_atomic(dest, &bytes).await?;
        info!(key, size = bytes.len(), "Artifact downloaded");
        Ok(())
    }
}

/// Local directory acting as the durable store; useful for dev and tests.
#[derive(Debug, Clone)]
pub struct DirArtifactStore {
    root: PathBuf,
}

impl DirArtifactStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArtifactStore for DirArtifactStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<(), ArtifactError> {
        if fs::try_exists(dest).await.unwrap_or(false) {
            debug!(key, dest = %dest.display(), "Artifact already cached, skipping copy");
            return Ok(());
        }

        let src = self.root.join(key);
        let bytes = match fs::read(&src).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound { key: key.to_owned() });
            },
            Err(err) => {
                return Err(ArtifactError::io(err, format!("read {}", src.display())));
            },
        };

        write_atomic(dest, &bytes).await?;
        debug!(key, size = bytes.len(), "Artifact copied into cache");
        Ok(())
    }
}

/// Writes `data` to `dest` via a unique temp file and an atomic rename.
///
/// The target is never observable in a partially written state, even if the
/// process crashes mid-write or two cold starts race on the same path.
async fn write_atomic(dest: &Path, data: &[u8]) -> Result<(), ArtifactError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ArtifactError::io(e, format!("create {}", parent.display())))?;
    }

    let temp = unique_tmp_path(dest);
    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp)
            .await
            .map_err(|e| ArtifactError::io(e, format!("temp creation {}", temp.display())))?;
        file.write_all(data)
            .await
            .map_err(|e| ArtifactError::io(e, format!("write {}", temp.display())))?;
        file.sync_all()
            .await
            .map_err(|e| ArtifactError::io(e, format!("sync {}", temp.display())))?;
    }

    if let Err(err) = fs::rename(&temp, dest).await {
        if err.kind() == std::io::ErrorKind::AlreadyExists {
            // A concurrent cold start won the race; its bytes are identical.
            let _ = fs::remove_file(&temp).await;
        } else {
            return Err(ArtifactError::io(
                err,
                format!("atomic swap {} -> {}", temp.display(), dest.display()),
            ));
        }
    }

    Ok(())
}

fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("artifact");
    target.with_file_name(format!("{file_name}.hvtmp.{}.{counter}", std::process::id()))
}
