//! # Logger
//!
//! Centralized logging setup for the project: console output, optional
//! rolling file output with non-blocking I/O, and environment-based
//! filtering via `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! # use homeval_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// A builder for configuring and initializing the global tracing subscriber.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

impl LoggerBuilder {
    /// Sets the logger name, used as the rolling log file prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables console logging.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Sets the directory for rolling log files. File output stays disabled
    /// until a path is provided.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Configures the minimum log level to be emitted.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Configures the log file rotation strategy.
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Configures the maximum number of rotated log files to keep.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Switches the file layer to JSON lines.
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Adds an explicit filter directive (e.g., `homeval=debug,hyper=info`).
    ///
    /// `RUST_LOG` still overrides; this is a programmatic default.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// Returns a [`Logger`] handle holding the non-blocking worker guard;
    /// keep it alive for the lifetime of the program so file logs flush.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an empty name, a
    /// zero `max_files`, or an unparsable filter directive.
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".to_owned(),
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".to_owned(),
            });
        }

        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = self.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Io {
                source: e,
                path: path.display().to_string(),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)?;

            let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);

            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(g)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no logging layers enabled; enable console or file output".to_owned(),
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("invalid env filter '{filter}': {e}"),
                })
            },
        )
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard; drop only on shutdown.
#[must_use = "Dropping this handle stops background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Returns a reference to the underlying worker guard, if file logging is on.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}
