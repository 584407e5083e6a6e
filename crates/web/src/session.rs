//! Session context: authentication state and its transitions.
//!
//! There is exactly one [`Session`] per running application. The
//! composition root owns it and hands out [`SessionHandle`]s; consumers
//! never hold a private copy of the state.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use campus_auth::{Role, User};
use campus_core::DomainError;

use crate::store::IdentityStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A consumer asked for the session outside the scope that installs it.
    /// This is an integration bug, not a runtime condition.
    #[error("session context unavailable: consumer is not inside an AuthProvider scope")]
    ContextUnavailable,

    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] DomainError),
}

/// How the deployment treats "logged out".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Logged out means anonymous; the initial identity comes from storage.
    #[default]
    Standard,

    /// Evaluation/demo deployments: the session is never anonymous.
    ///
    /// The initial identity and the post-logout identity are both
    /// `default_user`, and persisted identities are not restored. Logging in
    /// works as in standard mode.
    FixedDefault { default_user: User },
}

/// Logical session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(User),
}

/// The identity itself lives in the [`IdentityStore`]; the session only adds
/// the mode, which decides what "no stored identity" means.
#[derive(Debug)]
pub struct Session {
    store: IdentityStore,
    mode: SessionMode,
}

impl Session {
    /// Start the session: restore from storage, or use the fixed default.
    pub fn start(mut store: IdentityStore, mode: SessionMode) -> Self {
        if mode == SessionMode::Standard {
            store.read();
        }

        let session = Self { store, mode };
        match session.user() {
            Some(user) => tracing::info!(
                username = %user.username(),
                role = %user.role(),
                fixed_default = matches!(session.mode, SessionMode::FixedDefault { .. }),
                "session started"
            ),
            None => tracing::info!("session started anonymous"),
        }
        session
    }

    pub fn user(&self) -> Option<&User> {
        match &self.mode {
            SessionMode::Standard => self.store.current(),
            SessionMode::FixedDefault { default_user } => {
                self.store.current().or(Some(default_user))
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn state(&self) -> SessionState {
        match self.user() {
            Some(user) => SessionState::Authenticated(user.clone()),
            None => SessionState::Anonymous,
        }
    }

    /// Install `User{username, role}`, replacing any current identity.
    ///
    /// The identity has already been authenticated upstream; nothing here
    /// verifies credentials.
    pub fn login(&mut self, username: &str, role: Role) -> Result<User, SessionError> {
        let user = User::parse(username, role)?;
        self.store.write(user.clone());

        tracing::info!(username = %user.username(), role = %user.role(), "logged in");
        Ok(user)
    }

    /// Drop the current identity.
    ///
    /// Persisted identity is always deleted. In fixed-default mode the
    /// session falls back to the default user instead of anonymous.
    pub fn logout(&mut self) {
        self.store.clear();

        match self.user() {
            Some(user) => tracing::info!(
                username = %user.username(),
                role = %user.role(),
                "logged out to fixed default identity"
            ),
            None => tracing::info!("logged out"),
        }
    }
}

/// Shared handle to the application's single session.
///
/// Cloning the handle never clones the session.
#[derive(Debug, Clone)]
pub struct SessionHandle(Rc<RefCell<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Rc::new(RefCell::new(session)))
    }

    pub fn user(&self) -> Option<User> {
        self.0.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.borrow().is_authenticated()
    }

    pub fn state(&self) -> SessionState {
        self.0.borrow().state()
    }

    pub fn login(&self, username: &str, role: Role) -> Result<User, SessionError> {
        self.0.borrow_mut().login(username, role)
    }

    pub fn logout(&self) {
        self.0.borrow_mut().logout();
    }

    /// Whether two handles point at the same session.
    pub fn same_session(&self, other: &SessionHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
