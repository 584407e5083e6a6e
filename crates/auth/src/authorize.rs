use std::borrow::Cow;
use std::collections::BTreeSet;

use thiserror::Error;

use campus_core::{DomainError, DomainResult};

use crate::{Role, User};

/// Access rule attached to a guarded route.
///
/// # Invariants
/// - `required_roles` is never empty.
/// - The policy is evaluated on every navigation; nothing here remembers a
///   previous decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    required_roles: BTreeSet<Role>,
    fallback_path: Cow<'static, str>,
}

impl RoutePolicy {
    pub fn new(
        required_roles: impl IntoIterator<Item = Role>,
        fallback_path: impl Into<Cow<'static, str>>,
    ) -> DomainResult<Self> {
        let required_roles: BTreeSet<Role> = required_roles.into_iter().collect();
        if required_roles.is_empty() {
            return Err(DomainError::invariant("route policy requires at least one role"));
        }
        Ok(Self {
            required_roles,
            fallback_path: fallback_path.into(),
        })
    }

    /// Staff screens: admins and professors, everyone else goes home.
    pub fn staff() -> Self {
        Self {
            required_roles: BTreeSet::from([Role::Admin, Role::Professor]),
            fallback_path: Cow::Borrowed("/"),
        }
    }

    /// Administrator-only screens.
    pub fn admin_only() -> Self {
        Self {
            required_roles: BTreeSet::from([Role::Admin]),
            fallback_path: Cow::Borrowed("/"),
        }
    }

    pub fn required_roles(&self) -> &BTreeSet<Role> {
        &self.required_roles
    }

    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }

    pub fn permits(&self, role: Role) -> bool {
        self.required_roles.contains(&role)
    }
}

/// Why a visitor may not see a guarded screen.
///
/// This is a navigation outcome, not a failure: callers turn it into a
/// redirect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("not signed in")]
    Unauthenticated,

    #[error("role '{role}' is not permitted on this route")]
    InsufficientRole { role: Role },
}

/// Check whether `user` may view a route protected by `policy`.
///
/// - No IO
/// - No panics
/// - Roles are mutually exclusive per user, so this is plain set membership.
pub fn authorize_route(user: Option<&User>, policy: &RoutePolicy) -> Result<(), AccessDenied> {
    let Some(user) = user else {
        return Err(AccessDenied::Unauthenticated);
    };

    if policy.permits(user.role()) {
        Ok(())
    } else {
        Err(AccessDenied::InsufficientRole { role: user.role() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::parse("ana", role).unwrap()
    }

    #[test]
    fn empty_role_set_is_rejected() {
        let err = RoutePolicy::new(std::iter::empty::<Role>(), "/").unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn anonymous_visitor_is_unauthenticated() {
        let result = authorize_route(None, &RoutePolicy::staff());
        assert_eq!(result, Err(AccessDenied::Unauthenticated));
    }

    #[test]
    fn staff_policy_admits_admin_and_professor() {
        let policy = RoutePolicy::staff();

        assert!(authorize_route(Some(&user(Role::Admin)), &policy).is_ok());
        assert!(authorize_route(Some(&user(Role::Professor)), &policy).is_ok());
        assert_eq!(
            authorize_route(Some(&user(Role::General)), &policy),
            Err(AccessDenied::InsufficientRole { role: Role::General })
        );
    }

    #[test]
    fn admin_only_policy_rejects_professor() {
        let policy = RoutePolicy::admin_only();

        assert!(authorize_route(Some(&user(Role::Admin)), &policy).is_ok());
        assert!(authorize_route(Some(&user(Role::Professor)), &policy).is_err());
        assert_eq!(policy.fallback_path(), "/");
    }

    #[test]
    fn custom_policy_keeps_fallback() {
        let policy = RoutePolicy::new([Role::General, Role::General], "/advanced-search").unwrap();

        assert_eq!(policy.required_roles().len(), 1);
        assert_eq!(policy.fallback_path(), "/advanced-search");
    }
}
