//! HTTP server for the calculator page and its JSON endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::calculator::Calculator;
use crate::handlers;

/// Default listen address.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
    5000,
);

/// Errors raised while configuring or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listen address could not be parsed.
    #[error("Invalid listen address '{value}': {source}")]
    InvalidAddress {
        /// The rejected address text.
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors: Option<bool>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets the listen address from a host and a port.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address.
    pub fn host_port(mut self, host: &str, port: u16) -> Result<Self, ServerError> {
        let value = format!("{}:{}", host, port);
        let addr = value
            .parse()
            .map_err(|source| ServerError::InvalidAddress { value, source })?;
        self.addr = Some(addr);
        Ok(self)
    }

    /// Sets whether CORS is enabled.
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = Some(enabled);
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr.unwrap_or(DEFAULT_ADDR),
            cors: self.cors.unwrap_or(true),
        }
    }
}

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// The calculator every request evaluates with.
    pub calculator: Calculator,
    /// Server configuration.
    pub config: ServerConfig,
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server with the given configuration and calculator.
    pub fn new(config: ServerConfig, calculator: Calculator) -> Self {
        let state = Arc::new(AppState {
            calculator,
            config: config.clone(),
        });
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            // Calculator page and its aliases
            .route("/", get(handlers::index))
            .route("/my-calculator", get(handlers::index))
            .route("/advanced-calc", get(handlers::index))
            .route("/history", get(handlers::history))
            .route("/calculate", post(handlers::calculate))
            .route("/health", get(handlers::health))
            // Front-end assets
            .route("/static/js/calculator.js", get(handlers::calculator_js))
            .route("/static/css/style.css", get(handlers::style_css))
            .with_state(self.state.clone());

        router = router.layer(TraceLayer::new_for_http());

        if self.config.cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Runs the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the server fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let router = self.router();
        let addr = self.config.addr;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(addr = %addr, cors = self.config.cors, "Starting webcalc server");
        eprintln!("\n\x1b[32m✓\x1b[0m Calculator listening on http://{}", addr);
        eprintln!("  Press Ctrl+C to stop\n");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shutdown complete");
        eprintln!("\x1b[32m✓\x1b[0m Server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            eprintln!("\n\x1b[33m⚡\x1b[0m Received SIGTERM, shutting down gracefully...");
        },
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = ServerConfig::builder().build();
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert!(config.cors);

        let config = ServerConfig::builder()
            .host_port("0.0.0.0", 8080)
            .unwrap()
            .cors(false)
            .build();
        assert_eq!(config.addr.port(), 8080);
        assert!(!config.cors);
    }

    #[test]
    fn test_config_builder_rejects_hostnames() {
        let err = ServerConfig::builder()
            .host_port("not a host", 80)
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress { .. }));
        assert!(err.to_string().contains("not a host:80"));
    }
}
