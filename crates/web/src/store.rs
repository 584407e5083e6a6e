//! Identity store: who is using the application, durable across reloads.

use thiserror::Error;

use campus_auth::User;

use crate::storage::{StorageBackend, StorageError};

/// Default storage key holding the serialized identity.
pub const DEFAULT_STORAGE_KEY: &str = "user";

/// A persisted identity that failed to decode or validate.
///
/// Recovered locally: the store logs it and reports no identity.
#[derive(Debug, Error)]
#[error("malformed persisted identity: {0}")]
pub struct MalformedPersistedIdentity(#[from] serde_json::Error);

/// Decode and validate a persisted identity payload.
pub fn decode_identity(raw: &str) -> Result<User, MalformedPersistedIdentity> {
    Ok(serde_json::from_str(raw)?)
}

/// Single source of truth for the current identity.
///
/// Holds the identity in memory and mirrors it to a [`StorageBackend`].
/// Only `write` and `clear` touch storage; `read` does so only when memory
/// is empty.
#[derive(Debug)]
pub struct IdentityStore {
    backend: Box<dyn StorageBackend>,
    key: String,
    current: Option<User>,
}

impl IdentityStore {
    pub fn new(backend: impl StorageBackend + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
            current: None,
        }
    }

    /// In-memory identity, without consulting storage.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Current identity, restoring it from storage if memory is empty.
    ///
    /// Missing, unreadable, or malformed payloads all yield `None`.
    pub fn read(&mut self) -> Option<User> {
        if let Some(user) = &self.current {
            return Some(user.clone());
        }

        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to read persisted identity");
                return None;
            }
        };

        match decode_identity(&raw) {
            Ok(user) => {
                tracing::debug!(
                    key = %self.key,
                    username = %user.username(),
                    role = %user.role(),
                    "restored persisted identity"
                );
                self.current = Some(user.clone());
                Some(user)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "ignoring persisted identity");
                None
            }
        }
    }

    /// Install `user` in memory and persist it, replacing any previous value.
    ///
    /// Storage failures are logged; the in-memory identity changes regardless.
    pub fn write(&mut self, user: User) {
        let persisted = serde_json::to_string(&user)
            .map_err(StorageError::from)
            .and_then(|payload| self.backend.set(&self.key, &payload));

        if let Err(err) = persisted {
            tracing::error!(key = %self.key, error = %err, "failed to persist identity");
        }

        self.current = Some(user);
    }

    /// Forget the in-memory identity and delete the persisted one.
    pub fn clear(&mut self) {
        self.current = None;

        if let Err(err) = self.backend.remove(&self.key) {
            tracing::error!(key = %self.key, error = %err, "failed to delete persisted identity");
        }
    }
}
