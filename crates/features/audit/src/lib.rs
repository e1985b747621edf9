//! Audit feature slice: an append-only log of served predictions.
//!
//! Each successful prediction may append one record to a durable JSONL
//! file. The write is strictly best-effort: callers log failures and never
//! let them mask a successful prediction. Records are never mutated or
//! deleted by this system.

mod error;

pub use crate::error::AuditError;

use chrono::{DateTime, Utc};
use homeval_domain::config::AuditConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// One served prediction, as appended to the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    /// The raw request payload, as received.
    pub input: serde_json::Value,
    pub predicted_price_lakhs: f64,
}

impl AuditRecord {
    /// Builds a record stamped with the current UTC time.
    #[must_use]
    pub fn new(request_id: impl Into<String>, input: serde_json::Value, prediction: f64) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            input,
            // Stored at 4-decimal precision, matching the training pipeline's log.
            predicted_price_lakhs: (prediction * 10_000.0).round() / 10_000.0,
        }
    }
}

#[derive(Debug)]
struct AuditLogInner {
    path: PathBuf,
}

/// Handle to the append-only request log.
///
/// Cheap to clone; a disabled log (no path configured) accepts and discards
/// records so call sites need no conditionals.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    inner: Option<Arc<AuditLogInner>>,
}

impl AuditLog {
    /// Creates the log from configuration; unset `path` disables it.
    #[must_use]
    pub fn from_config(cfg: &AuditConfig) -> Self {
        match &cfg.path {
            Some(path) => {
                info!(path = %path.display(), "Audit log enabled");
                Self { inner: Some(Arc::new(AuditLogInner { path: path.clone() })) }
            },
            None => {
                debug!("Audit log disabled (no path configured)");
                Self { inner: None }
            },
        }
    }

    /// Creates an enabled log writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { inner: Some(Arc::new(AuditLogInner { path: path.into() })) }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Appends one record as a JSON line.
    ///
    /// # Errors
    /// Returns [`AuditError`] on serialization or I/O failure. Callers are
    /// expected to log and swallow the error; a failed audit write must not
    /// fail the prediction it records.
    pub async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let Some(inner) = &self.inner else {
            return Ok(());
        };

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        if let Some(parent) = inner.path.parent() {
            fs::create_dir_all(parent).await.map_err(|source| AuditError::Io {
                source,
                context: format!("create {}", parent.display()),
            })?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&inner.path)
            .await
            .map_err(|source| AuditError::Io {
                source,
                context: format!("open {}", inner.path.display()),
            })?;

        file.write_all(&line).await.map_err(|source| AuditError::Io {
            source,
            context: format!("append {}", inner.path.display()),
        })?;

        debug!(request_id = %record.request_id, "Audit record appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rounds_prediction_to_four_decimals() {
        let record = AuditRecord::new("req1", serde_json::json!({}), 87.123_456);
        assert!((record.predicted_price_lakhs - 87.1235).abs() < 1e-9);
    }

    #[tokio::test]
    async fn disabled_log_accepts_records() {
        let log = AuditLog::default();
        assert!(!log.is_enabled());
        let record = AuditRecord::new("req1", serde_json::json!({"BHK": 2}), 87.12);
        log.insert(&record).await.unwrap();
    }
}
