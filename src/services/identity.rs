// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity directory and the authentication capability built on it.

use crate::models::{Role, StoredIdentity, User};
use crate::time_utils::format_utc_rfc3339;
use base64::Engine;
use dashmap::DashMap;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Largest accepted profile photo once decoded.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;
const MAX_PHOTO_URL_LEN: usize = 2048;

/// Login form: all three fields must match a known identity.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// Never says which of username, password or role was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Returned by `Authenticator` implementations backed by an external
    /// identity service when that service cannot be reached. The in-memory
    /// directory never fails this way.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// Authentication capability consulted by login and the session extractor.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Current view of a user, or `None` if the account no longer exists.
    fn identity(&self, user_id: &str) -> Option<User>;
}

/// Salted SHA-256 of a password, hex encoded. The salt is the account id.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Build a fresh account row.
pub fn new_identity(
    username: &str,
    email: &str,
    password: &str,
    role: Role,
    first_name: Option<String>,
    last_name: Option<String>,
) -> StoredIdentity {
    let id = uuid::Uuid::new_v4().to_string();
    let now = format_utc_rfc3339(chrono::Utc::now());
    StoredIdentity {
        password_hash: hash_password(&id, password),
        user: User {
            id,
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            role,
            first_name,
            last_name,
            photo_url: None,
            last_updated: Some(now.clone()),
        },
        created_at: now,
    }
}

/// In-memory identity directory keyed by username.
///
/// Loaded from the `users` collection at startup; handlers persist a row
/// first and then [`insert`](IdentityDirectory::insert) it here.
#[derive(Debug, Default)]
pub struct IdentityDirectory {
    by_username: DashMap<String, StoredIdentity>,
}

impl IdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(identities: impl IntoIterator<Item = StoredIdentity>) -> Self {
        let directory = Self::new();
        for identity in identities {
            directory.insert(identity);
        }
        tracing::info!(count = directory.len(), "Loaded identity directory");
        directory
    }

    /// Rows for the two demo accounts (admin/admin123, geomaticien/geo123).
    pub fn demo_identities() -> Vec<StoredIdentity> {
        let demo = |id: &str, username: &str, email: &str, role, first: &str, last: &str, pw: &str| {
            StoredIdentity {
                user: User {
                    id: id.to_string(),
                    username: username.to_string(),
                    email: email.to_string(),
                    role,
                    first_name: Some(first.to_string()),
                    last_name: Some(last.to_string()),
                    photo_url: None,
                    last_updated: None,
                },
                password_hash: hash_password(id, pw),
                created_at: String::new(),
            }
        };

        vec![
            demo("1", "admin", "admin@sonaged.com", Role::Admin, "Admin", "User", "admin123"),
            demo(
                "2",
                "geomaticien",
                "geo@sonaged.com",
                Role::GeospatialOperator,
                "Geo",
                "Specialist",
                "geo123",
            ),
        ]
    }

    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }

    /// Insert or replace an account. A changed username drops the old key.
    pub fn insert(&self, identity: StoredIdentity) {
        self.by_username
            .retain(|name, existing| existing.user.id != identity.user.id || *name == identity.user.username);
        self.by_username
            .insert(identity.user.username.clone(), identity);
    }

    pub fn get(&self, user_id: &str) -> Option<StoredIdentity> {
        self.by_username
            .iter()
            .find(|entry| entry.value().user.id == user_id)
            .map(|entry| entry.value().clone())
    }

    pub fn username_taken(&self, username: &str, except_id: Option<&str>) -> bool {
        self.by_username
            .get(username)
            .is_some_and(|e| Some(e.user.id.as_str()) != except_id)
    }

    pub fn remove(&self, user_id: &str) -> Option<StoredIdentity> {
        let username = self.get(user_id)?.user.username;
        self.by_username.remove(&username).map(|(_, v)| v)
    }

    /// All accounts, sorted by username.
    pub fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .by_username
            .iter()
            .map(|entry| entry.value().user())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }
}

impl Authenticator for IdentityDirectory {
    fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let stored = self
            .by_username
            .get(credentials.username.trim())
            .map(|e| e.value().clone());

        // Hash even for unknown users so both paths cost the same
        let salt = stored.as_ref().map_or("", |s| s.user.id.as_str());
        let candidate = hash_password(salt, &credentials.password);

        let Some(stored) = stored else {
            tracing::debug!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let password_ok: bool = candidate
            .as_bytes()
            .ct_eq(stored.password_hash.as_bytes())
            .into();
        let role_ok = Role::parse(&credentials.role) == Some(stored.user.role);

        if password_ok && role_ok {
            tracing::info!(user_id = %stored.user.id, "Login succeeded");
            Ok(stored.user())
        } else {
            tracing::debug!("Login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }

    fn identity(&self, user_id: &str) -> Option<User> {
        self.get(user_id).map(|s| s.user())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhotoError {
    #[error("Photo must be an http(s) URL or a base64 image data URL")]
    UnsupportedUrl,

    #[error("Photo data is not valid base64")]
    BadEncoding,

    #[error("Photo exceeds 2 MiB")]
    TooLarge,
}

/// Check a profile photo reference before storing it.
pub fn check_photo_url(url: &str) -> Result<(), PhotoError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        return if url.len() <= MAX_PHOTO_URL_LEN {
            Ok(())
        } else {
            Err(PhotoError::UnsupportedUrl)
        };
    }

    let payload = url
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
        .ok_or(PhotoError::UnsupportedUrl)?;

    // 4 base64 chars carry 3 bytes; reject before decoding huge payloads
    if payload.len() / 4 * 3 > MAX_PHOTO_BYTES + 3 {
        return Err(PhotoError::TooLarge);
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| PhotoError::BadEncoding)?;
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge);
    }
    Ok(())
}
