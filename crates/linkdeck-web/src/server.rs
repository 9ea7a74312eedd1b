//! Main web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and
//! starts the HTTP listener.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use linkdeck_store::Database;

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// The Linkdeck web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// # Arguments
    ///
    /// * `config` - Bind address and port configuration.
    /// * `db` - The database handle shared by both stores.
    /// * `secret` - The session signing secret. Rotating it logs out
    ///   every outstanding session at once.
    pub fn new(config: WebConfig, db: Database, secret: &[u8]) -> Self {
        let state = Arc::new(AppState::new(db, secret));
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    ///
    /// Public so tests can drive handlers without binding a listener.
    pub fn router(&self) -> Router {
        Router::new()
            // Pages.
            .route("/", get(api::index))
            .route("/login", post(api::login))
            .route("/logout", get(api::logout))
            // JSON API, session-gated.
            .route("/api/change-password", post(api::change_password))
            .route(
                "/api/links",
                get(api::get_links)
                    .post(api::create_link)
                    .put(api::update_link)
                    .delete(api::delete_link),
            )
            .route("/api/reorder", post(api::reorder))
            .route("/api/categories/rename", post(api::rename_category))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!(addr = %addr, "starting web server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
