//! Error types for the linkdeck-session crate.
//!
//! Only minting can fail, and only on a serialization problem. Verification
//! deliberately has no error type: every failure mode collapses into
//! `None` so callers cannot leak which check rejected a token.

use thiserror::Error;

/// Alias for `Result<T, SessionError>`.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while minting a token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The token payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}
