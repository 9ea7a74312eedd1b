//! Credential persistence for the single operator account.
//!
//! One [`AuthRecord`] lives under a single kv key. An empty password hash
//! means the factory password is still in force, which also forces a
//! password change on the next login regardless of the stored flag.
//! Passwords are stored as hex-encoded SHA-256 digests; the digest format
//! is part of the persisted contract.

use ring::digest;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};

/// Storage key for the serialized auth record.
pub const AUTH_KEY: &str = "linkdeck_auth_v1";

/// Factory username.
pub const DEFAULT_USER: &str = "admin";

/// Factory password, valid only while the stored hash is empty.
pub const DEFAULT_PASS: &str = "admin123456";

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// The single operator's credential record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRecord {
    /// Login name.
    #[serde(rename = "user")]
    pub username: String,
    /// Hex SHA-256 digest of the password, or empty while the factory
    /// password is still in force.
    #[serde(rename = "passHash", default)]
    pub password_hash: String,
    /// Whether the operator must change the password before using the
    /// dashboard.
    #[serde(rename = "forceChange", default)]
    pub force_change: bool,
}

impl AuthRecord {
    /// The factory-default record seeded on first use.
    pub fn factory() -> Self {
        Self {
            username: DEFAULT_USER.to_string(),
            password_hash: String::new(),
            force_change: true,
        }
    }

    /// Check a candidate password. While the stored hash is empty the
    /// factory password is the one that matches.
    pub fn password_matches(&self, candidate: &str) -> bool {
        if self.password_hash.is_empty() {
            candidate == DEFAULT_PASS
        } else {
            sha256_hex(candidate) == self.password_hash
        }
    }

    /// Whether a session minted for this record must carry the
    /// must-change flag. True while the factory password is in force even
    /// if the stored flag was cleared.
    pub fn must_change(&self) -> bool {
        self.force_change || self.password_hash.is_empty()
    }
}

/// Hex-encoded SHA-256 digest of `input`.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(digest::digest(&digest::SHA256, input.as_bytes()))
}

/// Reads and writes the operator's [`AuthRecord`].
#[derive(Clone)]
pub struct CredentialStore {
    db: Database,
}

impl CredentialStore {
    /// Create a new credential store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the auth record, seeding factory defaults when absent or
    /// unreadable.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<AuthRecord> {
        if let Some(raw) = self.db.kv_get(AUTH_KEY).await? {
            match serde_json::from_str::<AuthRecord>(&raw) {
                Ok(record) if !record.username.is_empty() => {
                    debug!(user = %record.username, "auth record loaded");
                    return Ok(record);
                }
                Ok(_) => warn!("stored auth record has no username, reseeding"),
                Err(e) => warn!(error = %e, "stored auth record is unreadable, reseeding"),
            }
        }

        let seed = AuthRecord::factory();
        self.save(&seed).await?;
        info!("seeded factory auth record");
        Ok(seed)
    }

    /// Change the operator's password.
    ///
    /// The old password must match the current record (factory password
    /// while the hash is empty); the new one must be at least
    /// [`MIN_PASSWORD_LEN`] characters. On success the stored hash is
    /// replaced and the force-change flag cleared.
    #[instrument(skip(self, old_password, new_password))]
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> StoreResult<AuthRecord> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(StoreError::Validation(format!(
                "new password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut record = self.load().await?;
        if !record.password_matches(old_password) {
            return Err(StoreError::Unauthorized);
        }

        record.password_hash = sha256_hex(new_password);
        record.force_change = false;
        self.save(&record).await?;
        info!(user = %record.username, "password changed");
        Ok(record)
    }

    async fn save(&self, record: &AuthRecord) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(record)?;
        self.db.kv_put(AUTH_KEY, &serialized).await
    }
}

// ── tests ────────────────────────────────────────────────────────────
