//! Composition root: owns the session and wires consumers to it.

use crate::config::WebConfig;
use crate::router::{Navigator, Router};
use crate::scope::{AuthProvider, Scope};
use crate::session::{Session, SessionError, SessionHandle};
use crate::storage::StorageBackend;
use crate::store::IdentityStore;

/// A running application: one session, installed once, plus navigation.
#[derive(Debug)]
pub struct App {
    scope: Scope,
    navigator: Navigator,
}

impl App {
    /// Start the session over `backend` and install it at the root.
    pub fn compose(config: &WebConfig, backend: impl StorageBackend + 'static) -> Result<Self, SessionError> {
        let store = IdentityStore::new(backend, config.storage_key.clone());
        let session = Session::start(store, config.session_mode());

        let scope = AuthProvider::install(&Scope::root(), session);
        let navigator = Navigator::new(Router::campus(), &scope)?;

        Ok(Self { scope, navigator })
    }

    /// Compose with file storage under the configured (or default) directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn compose_native(config: &WebConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        use crate::storage::FileStorage;

        let dir = match &config.storage_dir {
            Some(dir) => dir.clone(),
            None => FileStorage::default_dir().context("failed to resolve session storage directory")?,
        };
        tracing::info!(dir = %dir.display(), key = %config.storage_key, "using file storage");

        Ok(Self::compose(config, FileStorage::new(dir))?)
    }

    /// Scope handed to presentation components.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn session(&self) -> &SessionHandle {
        self.navigator.session()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }
}
