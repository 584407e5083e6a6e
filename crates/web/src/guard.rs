//! Route guard: render a protected screen or redirect.

use campus_auth::{AccessDenied, RoutePolicy, authorize_route};

use crate::router::Screen;
use crate::session::SessionHandle;

/// Where unauthenticated visitors are sent, regardless of policy.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of resolving a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    Render(Screen),
    /// `replace` means the redirect replaces the current history entry
    /// instead of pushing a new one.
    Redirect { to: String, replace: bool },
}

impl RenderDecision {
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            replace: true,
        }
    }

    pub fn screen(&self) -> Option<Screen> {
        match self {
            RenderDecision::Render(screen) => Some(*screen),
            RenderDecision::Redirect { .. } => None,
        }
    }
}

/// Decide whether `screen` may render under `policy` for the current session.
///
/// Reads the session only; never mutates it.
pub fn guard(screen: Screen, policy: &RoutePolicy, session: &SessionHandle) -> RenderDecision {
    let user = session.user();

    match authorize_route(user.as_ref(), policy) {
        Ok(()) => RenderDecision::Render(screen),
        Err(AccessDenied::Unauthenticated) => {
            tracing::debug!(?screen, to = LOGIN_PATH, "anonymous visitor redirected");
            RenderDecision::redirect(LOGIN_PATH)
        }
        Err(denied @ AccessDenied::InsufficientRole { .. }) => {
            tracing::debug!(
                ?screen,
                to = policy.fallback_path(),
                reason = %denied,
                "visitor redirected"
            );
            RenderDecision::redirect(policy.fallback_path())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_auth::Role;

    use crate::session::{Session, SessionMode};
    use crate::storage::MemoryStorage;
    use crate::store::{DEFAULT_STORAGE_KEY, IdentityStore};

    fn handle() -> SessionHandle {
        SessionHandle::new(Session::start(
            IdentityStore::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY),
            SessionMode::Standard,
        ))
    }

    #[test]
    fn anonymous_goes_to_login_not_fallback() {
        let policy = RoutePolicy::new([Role::Admin], "/advanced-search").unwrap();
        let decision = guard(Screen::ProfessorDashboard, &policy, &handle());

        assert_eq!(decision, RenderDecision::redirect(LOGIN_PATH));
    }

    #[test]
    fn wrong_role_goes_to_fallback() {
        let session = handle();
        session.login("ana", Role::General).unwrap();

        let decision = guard(Screen::ProfessorDashboard, &RoutePolicy::staff(), &session);
        assert_eq!(decision, RenderDecision::redirect("/"));
        assert_eq!(decision.screen(), None);
    }

    #[test]
    fn permitted_roles_render() {
        let session = handle();
        for role in [Role::Admin, Role::Professor] {
            session.login("ana", role).unwrap();
            let decision = guard(Screen::ProfessorDashboard, &RoutePolicy::staff(), &session);
            assert_eq!(decision.screen(), Some(Screen::ProfessorDashboard));
        }
    }

    #[test]
    fn decision_follows_role_changes() {
        let session = handle();
        let policy = RoutePolicy::staff();

        session.login("ana", Role::Professor).unwrap();
        assert!(guard(Screen::ProfessorDashboard, &policy, &session).screen().is_some());

        session.login("ana", Role::General).unwrap();
        assert!(guard(Screen::ProfessorDashboard, &policy, &session).screen().is_none());

        session.logout();
        assert_eq!(
            guard(Screen::ProfessorDashboard, &policy, &session),
            RenderDecision::redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn guard_never_mutates_session() {
        let session = handle();
        session.login("ana", Role::General).unwrap();
        let before = session.state();

        let _ = guard(Screen::ProfessorDashboard, &RoutePolicy::admin_only(), &session);
        assert_eq!(session.state(), before);
    }
}
