//! Session context for components.
//!
//! The session itself is not reactive, so the context pairs the handle with
//! a revision signal: transitions bump it, reads track it.

use leptos::*;
use leptos_router::{NavigateOptions, Redirect};

use campus_auth::{Role, RoutePolicy, User};

use crate::guard::{RenderDecision, guard};
use crate::router::Screen;
use crate::session::{Session, SessionError, SessionHandle};

#[derive(Debug, Clone)]
pub struct AuthContext {
    session: SessionHandle,
    revision: RwSignal<u64>,
}

impl AuthContext {
    fn new(session: SessionHandle) -> Self {
        Self {
            session,
            revision: create_rw_signal(0),
        }
    }

    fn track(&self) {
        let _ = self.revision.get();
    }

    fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }

    pub fn user(&self) -> Option<User> {
        self.track();
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.track();
        self.session.is_authenticated()
    }

    pub fn login(&self, username: &str, role: Role) -> Result<User, SessionError> {
        let user = self.session.login(username, role)?;
        self.bump();
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.logout();
        self.bump();
    }

    /// Guard `screen` under `policy`; re-runs whenever the session changes.
    pub fn guard(&self, screen: Screen, policy: &RoutePolicy) -> RenderDecision {
        self.track();
        guard(screen, policy, &self.session)
    }
}

/// Installs the application's session for every descendant component.
#[component]
pub fn AuthProvider(session: Session, children: Children) -> impl IntoView {
    provide_context(AuthContext::new(SessionHandle::new(session)));
    children()
}

/// Session context from the nearest [`AuthProvider`].
pub fn use_auth() -> Result<AuthContext, SessionError> {
    use_context::<AuthContext>().ok_or(SessionError::ContextUnavailable)
}

/// Like [`use_auth`], but a missing provider aborts rendering. A component
/// mounted outside the provider is a wiring bug, not a state to render.
pub fn expect_auth() -> AuthContext {
    use_auth().unwrap_or_else(|err| panic!("{err}"))
}

/// Renders `children` only when the session satisfies `policy`; otherwise
/// replaces the current history entry with the guard's redirect.
#[component]
pub fn Protected(screen: Screen, policy: RoutePolicy, children: ChildrenFn) -> impl IntoView {
    let auth = expect_auth();

    move || match auth.guard(screen, &policy) {
        RenderDecision::Render(_) => children().into_view(),
        RenderDecision::Redirect { to, replace } => {
            let options = NavigateOptions {
                replace,
                ..Default::default()
            };
            view! { <Redirect path=to options=options/> }.into_view()
        }
    }
}
