//! Minting and verifying session tokens.
//!
//! A token is `base64(payload_json) + "." + base64(hmac_sha256(payload_b64))`,
//! signed with a server-held secret. It is fully self-describing: no token
//! is ever stored server-side, expiry is purely time-based, and rotating
//! the secret invalidates every outstanding token at once (a deliberate
//! mass-logout operation).
//!
//! Verification fails closed: a malformed token, a bad signature, a wrong
//! secret, and an elapsed expiry all collapse into the same "no session"
//! outcome, with no detail about which check failed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use ring::hmac;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};

/// Fixed session lifetime: 24 hours.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// The identity carried by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The authenticated user.
    pub user: String,
    /// Whether the operator must change the password before proceeding.
    pub must_change: bool,
}

/// Signed token payload. Field names match the wire format.
#[derive(Serialize, Deserialize)]
struct Payload {
    /// User identity.
    u: String,
    /// Must-change-password flag.
    mc: bool,
    /// Expiry as Unix epoch milliseconds.
    exp: i64,
    /// Random nonce so two tokens minted in the same millisecond for the
    /// same user still differ.
    n: String,
}

/// Mints and verifies session tokens under one signing secret.
///
/// The secret is an explicit constructor dependency rather than ambient
/// state so codecs with different secrets can coexist in tests.
#[derive(Clone)]
pub struct SessionCodec {
    key: hmac::Key,
}

impl SessionCodec {
    /// Create a codec signing with `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Mint a token for `user` expiring [`SESSION_TTL_SECS`] from now.
    pub fn mint(&self, user: &str, must_change: bool) -> SessionResult<String> {
        self.mint_at(user, must_change, Utc::now().timestamp_millis())
    }

    /// Mint a token with an explicit clock reading. Expiry is
    /// `now_ms + SESSION_TTL_SECS * 1000`.
    pub fn mint_at(&self, user: &str, must_change: bool, now_ms: i64) -> SessionResult<String> {
        let payload = Payload {
            u: user.to_string(),
            mc: must_change,
            exp: now_ms + SESSION_TTL_SECS * 1_000,
            n: Uuid::new_v4().to_string(),
        };
        let payload_b64 = BASE64.encode(serde_json::to_vec(&payload).map_err(SessionError::from)?);
        let signature = hmac::sign(&self.key, payload_b64.as_bytes());
        debug!(user, must_change, exp = payload.exp, "session token minted");
        Ok(format!("{payload_b64}.{}", BASE64.encode(signature.as_ref())))
    }

    /// Verify a token against the current clock.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify a token with an explicit clock reading.
    ///
    /// Returns `None` on any failure — malformed structure, undecodable
    /// segments, signature mismatch, or `now_ms >= exp` — without
    /// distinguishing between them.
    pub fn verify_at(&self, token: &str, now_ms: i64) -> Option<Claims> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        if payload_b64.is_empty() || signature_b64.is_empty() {
            return None;
        }

        let received = BASE64.decode(signature_b64).ok()?;
        let expected = hmac::sign(&self.key, payload_b64.as_bytes());
        if !constant_time_eq(expected.as_ref(), &received) {
            return None;
        }

        let payload: Payload = serde_json::from_slice(&BASE64.decode(payload_b64).ok()?).ok()?;
        if now_ms >= payload.exp {
            return None;
        }

        Some(Claims {
            user: payload.u,
            must_change: payload.mc,
        })
    }
}

/// Constant-time byte comparison for the signature check.
///
/// Accumulates XOR differences across every byte and never short-circuits,
/// so the comparison's timing does not depend on where the first mismatch
/// sits. Do not replace with `==`.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn codec() -> SessionCodec {
        SessionCodec::new(SECRET)
    }

    #[test]
    fn mint_then_verify_round_trips() {
        let codec = codec();
        let token = codec.mint("admin", false).unwrap();
        let claims = codec.verify(&token).expect("freshly minted token verifies");
        assert_eq!(claims.user, "admin");
        assert!(!claims.must_change);
    }

    #[test]
    fn must_change_flag_survives_round_trip() {
        let codec = codec();
        let token = codec.mint("admin", true).unwrap();
        assert!(codec.verify(&token).unwrap().must_change);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let now = 1_700_000_000_000;
        let token = codec.mint_at("admin", false, now).unwrap();

        assert!(codec.verify_at(&token, now).is_some());
        // One millisecond before expiry still passes, the boundary does not.
        let exp = now + SESSION_TTL_SECS * 1_000;
        assert!(codec.verify_at(&token, exp - 1).is_some());
        assert!(codec.verify_at(&token, exp).is_none());
        assert!(codec.verify_at(&token, exp + 1).is_none());
    }

    #[test]
    fn token_minted_in_the_past_is_rejected_now() {
        let codec = codec();
        let long_ago = Utc::now().timestamp_millis() - 2 * SESSION_TTL_SECS * 1_000;
        let token = codec.mint_at("admin", false, long_ago).unwrap();
        assert!(codec.verify(&token).is_none());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = codec();
        let token = codec.mint("admin", false).unwrap();
        let (payload_b64, signature_b64) = token.split_once('.').unwrap();

        let mut sig = BASE64.decode(signature_b64).unwrap();
        for i in 0..sig.len() {
            sig[i] ^= 0x01;
            let forged = format!("{payload_b64}.{}", BASE64.encode(&sig));
            assert!(codec.verify(&forged).is_none(), "flipped byte {i} accepted");
            sig[i] ^= 0x01;
        }
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.mint("admin", true).unwrap();
        let (payload_b64, signature_b64) = token.split_once('.').unwrap();

        // Re-encode a payload claiming a different user under the old sig.
        let mut payload: serde_json::Value =
            serde_json::from_slice(&BASE64.decode(payload_b64).unwrap()).unwrap();
        payload["u"] = "intruder".into();
        let forged_payload = BASE64.encode(serde_json::to_vec(&payload).unwrap());
        let forged = format!("{forged_payload}.{signature_b64}");

        assert!(codec.verify(&forged).is_none());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = codec().mint("admin", false).unwrap();
        let other = SessionCodec::new(b"rotated-secret");
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let codec = codec();
        for bad in [
            "",
            ".",
            "no-separator",
            "only-payload.",
            ".only-signature",
            "!!!.???",
            "bm90IGpzb24=.bm90IGpzb24=",
        ] {
            assert!(codec.verify(bad).is_none(), "accepted: {bad:?}");
        }
    }

    #[test]
    fn tokens_for_identical_claims_differ() {
        let codec = codec();
        let now = 1_700_000_000_000;
        let a = codec.mint_at("admin", false, now).unwrap();
        let b = codec.mint_at("admin", false, now).unwrap();
        // The nonce makes equal-claim tokens distinct.
        assert_ne!(a, b);
    }

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
