//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers. Both stores hand out clones of the same underlying database
//! handle; the session codec carries the signing secret so no handler
//! touches ambient state.

use linkdeck_session::SessionCodec;
use linkdeck_store::{CredentialStore, Database, LinkStore};

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Load/persist cycle for the link hierarchy.
    pub links: LinkStore,

    /// The operator's credential record.
    pub credentials: CredentialStore,

    /// Mints and verifies session tokens.
    pub sessions: SessionCodec,
}

impl AppState {
    /// Build the state from a database handle and the signing secret.
    pub fn new(db: Database, secret: &[u8]) -> Self {
        Self {
            links: LinkStore::new(db.clone()),
            credentials: CredentialStore::new(db),
            sessions: SessionCodec::new(secret),
        }
    }
}
