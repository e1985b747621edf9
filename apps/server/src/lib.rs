//! # Homeval Server
//!
//! An `Axum` web server that serves real-estate price predictions from a
//! pre-trained regression artifact. On build it performs the cold start:
//! fetching model artifacts from the configured store into the local cache
//! and loading them once into an immutable bundle shared by all requests.
//!
//! ## Example
//! ```no_run
//! use homeval_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4710)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum_server::Handle;
use homeval_artifacts::ArtifactBundle;
use homeval_audit::AuditLog;
use homeval_domain::config::ApiConfig;
use homeval_kernel::server::ApiState;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates the SSL configuration, if any
    /// 2. Performs the artifact cold start (fetch-if-absent, then load)
    /// 3. Opens the audit log, if configured
    /// 4. Constructs the immutable application state
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files cannot be read
    /// * An artifact cannot be fetched or parsed
    /// * The model's feature count disagrees with the column schema
    pub async fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);

        info!(
            address = %address,
            "Initializing server"
        );

        // Cold start: all three artifacts are fetched and loaded exactly once.
        let artifacts = ArtifactBundle::builder()
            .config(&self.cfg.artifacts)
            .load()
            .await
            .context("Failed to load model artifacts")?;

        let audit = AuditLog::from_config(&self.cfg.audit);

        let state = ApiState::builder()
            .config(self.cfg)
            .artifacts(artifacts)
            .audit(audit)
            .build()
            .context("Failed to finalize API state")?;

        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until a shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured
    /// address or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, draining in-flight requests...");
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
        });

        match &cfg.server.ssl {
            Some(ssl) => {
                info!("Serving predictions on https://{address}");

                let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;

                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .context("HTTPS server failed")?;
            },
            None => {
                info!("Serving predictions on http://{address}");

                axum_server::bind(address)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .context("HTTP server failed")?;
            },
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
