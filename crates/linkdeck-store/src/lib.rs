//! Persistence layer for Linkdeck.
//!
//! Everything durable lives in a single SQLite database behind a plain
//! key-value surface (`kv_get`/`kv_put`). Two keys are in use: one for the
//! operator's credential record and one for the categories-and-links tree.
//!
//! - [`Database`] — SQLite handle with async dispatch and the kv surface.
//! - [`CredentialStore`] — the single operator account.
//! - [`LinkStore`] — load/normalize/persist cycle for the [`LinkTree`].
//! - [`reconcile`] — merges client-submitted orderings without data loss.

pub mod auth;
pub mod db;
pub mod error;
pub mod links;
mod migration;
pub mod reconcile;
pub mod tree;

pub use auth::{AuthRecord, CredentialStore};
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use links::LinkStore;
pub use reconcile::{CategoryPatch, LinkRef, TreePatch, reconcile};
pub use tree::{Category, Link, LinkTree};
