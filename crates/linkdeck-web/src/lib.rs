//! Web interface for Linkdeck.
//!
//! This crate provides the HTTP server that exposes the dashboard:
//!
//! - Page routes: login, forced password change, and the dashboard itself,
//!   all served as embedded HTML.
//! - A JSON API for link/category mutations and drag-and-drop reordering,
//!   gated behind the session cookie.
//!
//! Handlers are thin: each one resolves the session, runs one
//! load-mutate-persist cycle against the store, and maps store errors onto
//! status codes.

pub mod api;
pub mod frontend;
pub mod server;
pub mod state;

pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 8420,
        }
    }
}
