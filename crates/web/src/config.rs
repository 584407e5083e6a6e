//! Deployment configuration.
//!
//! Values come from environment variables at runtime (native) or at build
//! time (WASM, where there is no process environment).

use std::path::PathBuf;

use thiserror::Error;

use campus_auth::DemoUser;

use crate::session::SessionMode;
use crate::store::DEFAULT_STORAGE_KEY;

/// Demo user the session falls back to; unset means standard mode.
pub const ENV_FIXED_DEFAULT_USER: &str = "CAMPUS_FIXED_DEFAULT_USER";
/// Storage key holding the serialized identity.
pub const ENV_STORAGE_KEY: &str = "CAMPUS_STORAGE_KEY";
/// Directory for native file storage.
pub const ENV_STORAGE_DIR: &str = "CAMPUS_STORAGE_DIR";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Fixed-default mode. Off unless explicitly configured.
    pub fixed_default_user: Option<DemoUser>,
    pub storage_key: String,
    pub storage_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            fixed_default_user: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
        }
    }
}

impl WebConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration baked in at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| {
            let value = match var {
                ENV_FIXED_DEFAULT_USER => option_env!("CAMPUS_FIXED_DEFAULT_USER"),
                ENV_STORAGE_KEY => option_env!("CAMPUS_STORAGE_KEY"),
                ENV_STORAGE_DIR => option_env!("CAMPUS_STORAGE_DIR"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = read(ENV_FIXED_DEFAULT_USER) {
            let demo = value.parse::<DemoUser>().map_err(|err| ConfigError::InvalidValue {
                var: ENV_FIXED_DEFAULT_USER,
                value: value.clone(),
                reason: err.to_string(),
            })?;
            config.fixed_default_user = Some(demo);
        }

        if let Some(value) = read(ENV_STORAGE_KEY) {
            validate_storage_key(&value)?;
            config.storage_key = value;
        }

        if let Some(value) = read(ENV_STORAGE_DIR) {
            config.storage_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }

    pub fn session_mode(&self) -> SessionMode {
        match self.fixed_default_user {
            Some(demo) => SessionMode::FixedDefault {
                default_user: demo.user(),
            },
            None => SessionMode::Standard,
        }
    }
}

// The key doubles as a file name for native storage.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            var: ENV_STORAGE_KEY,
            value: key.to_string(),
            reason: "use ASCII letters, digits, '-', '_' or '.' (not leading)".to_string(),
        })
    }
}
