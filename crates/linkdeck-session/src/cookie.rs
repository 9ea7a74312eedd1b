//! Session cookie formatting and parsing.
//!
//! The token travels in a single `HttpOnly` cookie. Base64 and the `.`
//! separator are all within the cookie-octet alphabet, so the value needs
//! no additional encoding.

use crate::codec::SESSION_TTL_SECS;

/// Name of the session cookie.
pub const COOKIE_NAME: &str = "linkdeck_session";

/// Build a `Set-Cookie` header value carrying `value` for `max_age`
/// seconds. Pass an empty value and zero max-age to clear the cookie.
pub fn build_cookie(value: &str, max_age: i64) -> String {
    format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}; Secure")
}

/// A `Set-Cookie` value carrying a fresh session token for the full TTL.
pub fn session_cookie(token: &str) -> String {
    build_cookie(token, SESSION_TTL_SECS)
}

/// A `Set-Cookie` value that clears the session cookie.
pub fn clear_cookie() -> String {
    build_cookie("", 0)
}

/// Extract the session token from a `Cookie` request header, if present.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

// ── tests ────────────────────────────────────────────────────────────
