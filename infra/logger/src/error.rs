use thiserror::Error;

/// Errors returned while configuring the logging system.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid logger configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Failed to prepare log directory {path}: {source}")]
    Io { source: std::io::Error, path: String },

    #[error("Failed to build file appender: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("Failed to install global subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
