//! # Session Guard
//!
//! A convenience gate in front of catalog mutations, not a security boundary.
//!
//! - `adminData` holds the one credential pair, seeded with a default on first
//!   use.
//! - A successful login writes `adminToken`: base64 of
//!   `{"username": ..., "role": "admin"}`. Anyone with write access to the
//!   data directory can forge it.
//! - The session is active while the token decodes and its role is `admin`.
//!
//! Components that care about login state (e.g. a navigation bar) register
//! with [`SessionEvents::subscribe`] and are called once per login and once per
//! logout instead of polling the token.

use crate::error::{Result, StoreError};
use crate::store::backend::{StorageBackend, ADMIN_DATA_SLOT, ADMIN_TOKEN_SLOT};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADMIN_USERNAME: &str = "rd";
pub const DEFAULT_ADMIN_PASSWORD: &str = "abcd";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl AdminCredentials {
    fn seed() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Decoded content of the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    pub role: String,
}

/// Write the default credential pair unless one is already stored.
pub fn ensure_admin_seeded<B: StorageBackend>(backend: &B) -> Result<()> {
    if backend.read_slot(ADMIN_DATA_SLOT)?.is_none() {
        let content = serde_json::to_string(&AdminCredentials::seed())?;
        backend.write_slot(ADMIN_DATA_SLOT, &content)?;
        tracing::debug!("seeded default admin credentials");
    }
    Ok(())
}

fn stored_credentials<B: StorageBackend>(backend: &B) -> Result<AdminCredentials> {
    let raw = backend.read_slot(ADMIN_DATA_SLOT)?;
    // Unparseable credentials match nothing rather than failing the login path.
    Ok(raw
        .and_then(|r| serde_json::from_str(&r).ok())
        .unwrap_or_default())
}

/// Check the pair against `adminData` and, on a match, store a fresh token.
pub fn login<B: StorageBackend>(backend: &B, username: &str, password: &str) -> Result<String> {
    ensure_admin_seeded(backend)?;
    let stored = stored_credentials(backend)?;

    if stored.username.is_empty() || stored.username != username || stored.password != password {
        tracing::warn!(%username, "admin login rejected");
        return Err(StoreError::InvalidCredentials);
    }

    let claims = SessionClaims {
        username: username.to_string(),
        role: ADMIN_ROLE.to_string(),
    };
    let token = encode_token(&claims)?;
    backend.write_slot(ADMIN_TOKEN_SLOT, &token)?;
    tracing::info!(%username, "admin logged in");
    Ok(token)
}

pub fn logout<B: StorageBackend>(backend: &B) -> Result<()> {
    backend.remove_slot(ADMIN_TOKEN_SLOT)?;
    tracing::info!("admin logged out");
    Ok(())
}

/// Claims of the active session, if any. Any read or decode failure counts as
/// logged out.
pub fn current_session<B: StorageBackend>(backend: &B) -> Option<SessionClaims> {
    let token = backend.read_slot(ADMIN_TOKEN_SLOT).ok().flatten()?;
    decode_token(&token).filter(|claims| claims.role == ADMIN_ROLE)
}

pub fn is_authenticated<B: StorageBackend>(backend: &B) -> bool {
    current_session(backend).is_some()
}

pub fn encode_token(claims: &SessionClaims) -> Result<String> {
    let json = serde_json::to_string(claims)?;
    Ok(general_purpose::STANDARD.encode(json))
}

pub fn decode_token(token: &str) -> Option<SessionClaims> {
    let bytes = general_purpose::STANDARD.decode(token.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { username: String },
    LoggedOut,
}

type Subscriber = Box<dyn Fn(&SessionEvent)>;

/// Login/logout notifications.
#[derive(Default)]
pub struct SessionEvents {
    subscribers: Vec<Subscriber>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn notify(&self, event: &SessionEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}
