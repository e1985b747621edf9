use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Custom error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error ({context}): {source}")]
    Config { source: config::ConfigError, context: String },
}

/// A reusable configuration loader combining file-based settings with
/// environment overrides.
///
/// Layered strategy:
/// 1. **Base File**: settings from a file (e.g., `server.toml`); defaults to
///    `"server"` in the working directory when no path is given.
/// 2. **Environment Overrides**: values from variables prefixed with
///    `HOMEVAL__`, using double underscores for nesting (e.g.,
///    `HOMEVAL__SERVER__PORT` maps to `server.port`).
///
/// # Errors
/// Returns an error if the configuration file cannot be found or its content
/// does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use homeval_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder().add_source(File::from(effective_path.as_path()).required(true)).add_source(
        Environment::with_prefix("HOMEVAL").separator("__").convert_case(config::Case::Snake),
    );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .map_err(|source| ConfigError::Config { source, context: "Failed to build config".to_owned() })?
        .try_deserialize::<T>()
        .map_err(|source| ConfigError::Config {
            source,
            context: "Failed to deserialize config".to_owned(),
        })?;

    Ok(config)
}
