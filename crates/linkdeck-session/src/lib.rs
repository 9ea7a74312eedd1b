//! Stateless session authentication for Linkdeck.
//!
//! Issues and verifies self-contained, signed, expiring credentials with
//! no server-side session storage. See [`SessionCodec`] for the token
//! format and [`cookie`] for how tokens travel.

pub mod codec;
pub mod cookie;
pub mod error;

pub use codec::{Claims, SESSION_TTL_SECS, SessionCodec};
pub use cookie::{COOKIE_NAME, build_cookie, clear_cookie, read_cookie, session_cookie};
pub use error::{SessionError, SessionResult};
