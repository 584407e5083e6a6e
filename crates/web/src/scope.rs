//! Composition scope: how consumers reach the session.
//!
//! The composition root creates a root [`Scope`], installs the session with
//! [`AuthProvider::install`], and passes the resulting scope (or children of
//! it) to every consumer. A consumer holding a scope without a session gets
//! [`SessionError::ContextUnavailable`].

use crate::session::{Session, SessionError, SessionHandle};

#[derive(Debug, Clone, Default)]
pub struct Scope {
    session: Option<SessionHandle>,
}

impl Scope {
    /// Top-level scope; nothing is installed yet.
    pub fn root() -> Self {
        Self::default()
    }

    /// Nested scope inheriting everything installed above it.
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Reach the session installed by an enclosing [`AuthProvider`].
    pub fn use_auth(&self) -> Result<SessionHandle, SessionError> {
        self.session.clone().ok_or(SessionError::ContextUnavailable)
    }
}

/// Installs the application's single session into a scope.
pub struct AuthProvider;

impl AuthProvider {
    pub fn install(parent: &Scope, session: Session) -> Scope {
        let mut scope = parent.child();
        scope.session = Some(SessionHandle::new(session));
        scope
    }
}
