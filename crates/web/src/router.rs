//! Declarative route table and navigation history.

use std::borrow::Cow;

use thiserror::Error;

use campus_auth::RoutePolicy;

use crate::guard::{RenderDecision, guard};
use crate::scope::Scope;
use crate::session::{SessionError, SessionHandle};

/// Redirect hops followed by a single navigation before giving up.
pub const MAX_REDIRECTS: usize = 8;

/// History entries kept by a [`Navigator`]; the oldest are dropped first.
pub const MAX_HISTORY: usize = 64;

/// Screens the application can show. Their bodies live in the presentation
/// layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Login,
    Register,
    AdvancedSearch,
    ProfessorDashboard,
    NotFound,
}

impl core::fmt::Display for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Login => "login",
            Screen::Register => "register",
            Screen::AdvancedSearch => "advanced-search",
            Screen::ProfessorDashboard => "professor-dashboard",
            Screen::NotFound => "not-found",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(Cow<'static, str>),
    /// Matches any path.
    Wildcard,
}

impl RoutePattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(expected) => expected == path,
            RoutePattern::Wildcard => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: RoutePattern,
    screen: Screen,
    policy: Option<RoutePolicy>,
}

impl Route {
    pub fn public(path: impl Into<Cow<'static, str>>, screen: Screen) -> Self {
        Self {
            pattern: RoutePattern::Exact(path.into()),
            screen,
            policy: None,
        }
    }

    pub fn guarded(path: impl Into<Cow<'static, str>>, screen: Screen, policy: RoutePolicy) -> Self {
        Self {
            pattern: RoutePattern::Exact(path.into()),
            screen,
            policy: Some(policy),
        }
    }

    /// Catch-all route; place it last.
    pub fn fallback(screen: Screen) -> Self {
        Self {
            pattern: RoutePattern::Wildcard,
            screen,
            policy: None,
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn policy(&self) -> Option<&RoutePolicy> {
        self.policy.as_ref()
    }
}

/// Ordered route table; the first matching route wins.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's route table.
    pub fn campus() -> Self {
        Self::new(vec![
            Route::public("/", Screen::Home),
            Route::public("/login", Screen::Login),
            Route::public("/register", Screen::Register),
            Route::public("/advanced-search", Screen::AdvancedSearch),
            Route::guarded("/professor", Screen::ProfessorDashboard, RoutePolicy::staff()),
            Route::fallback(Screen::NotFound),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route matching the normalized `path`.
    pub fn route_for(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.pattern.matches(&path))
    }

    /// Resolve a path for the current session.
    ///
    /// Policies are evaluated on every call; nothing is cached across role
    /// changes. Unmatched paths render [`Screen::NotFound`].
    pub fn resolve(&self, path: &str, session: &SessionHandle) -> RenderDecision {
        match self.route_for(path) {
            Some(Route {
                screen,
                policy: Some(policy),
                ..
            }) => guard(*screen, policy, session),
            Some(route) => RenderDecision::Render(route.screen),
            None => RenderDecision::Render(Screen::NotFound),
        }
    }
}

/// Strip query/fragment and trailing slashes; empty becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("redirect loop navigating to '{path}' (gave up after {hops} hops)")]
    RedirectLoop { path: String, hops: usize },
}

/// Navigation history over a router and the installed session.
#[derive(Debug)]
pub struct Navigator {
    router: Router,
    session: SessionHandle,
    entries: Vec<String>,
}

impl Navigator {
    /// Build a navigator for a consumer scope.
    ///
    /// Fails with [`SessionError::ContextUnavailable`] when the scope has no
    /// session installed.
    pub fn new(router: Router, scope: &Scope) -> Result<Self, SessionError> {
        Ok(Self {
            router,
            session: scope.use_auth()?,
            entries: Vec::new(),
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Navigate to `path`, following redirects until a screen renders.
    ///
    /// The visited path is pushed; each redirect replaces (or pushes, when
    /// `replace` is false) the current entry. History is capped at
    /// [`MAX_HISTORY`] entries.
    pub fn navigate(&mut self, path: &str) -> Result<Screen, RouterError> {
        let requested = normalize_path(path);
        self.push(requested.clone());

        for _ in 0..=MAX_REDIRECTS {
            let current = self.current().unwrap_or("/").to_string();
            match self.router.resolve(&current, &self.session) {
                RenderDecision::Render(screen) => {
                    tracing::debug!(path = %current, %screen, "rendered");
                    return Ok(screen);
                }
                RenderDecision::Redirect { to, replace } => {
                    let to = normalize_path(&to);
                    tracing::debug!(from = %current, to = %to, "redirect");
                    if replace {
                        self.entries.pop();
                    }
                    self.push(to);
                }
            }
        }

        tracing::warn!(path = %requested, hops = MAX_REDIRECTS, "redirect loop");
        Err(RouterError::RedirectLoop {
            path: requested,
            hops: MAX_REDIRECTS,
        })
    }

    fn push(&mut self, path: String) {
        if self.entries.len() == MAX_HISTORY {
            self.entries.remove(0);
        }
        self.entries.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_auth::Role;

    use crate::scope::AuthProvider;
    use crate::session::{Session, SessionMode};
    use crate::storage::MemoryStorage;
    use crate::store::{DEFAULT_STORAGE_KEY, IdentityStore};

    fn scope() -> Scope {
        let session = Session::start(
            IdentityStore::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY),
            SessionMode::Standard,
        );
        AuthProvider::install(&Scope::root(), session)
    }

    #[test]
    fn normalizes_paths() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path("/professor/"), "/professor");
        assert_eq!(normalize_path("/login?next=/professor"), "/login");
        assert_eq!(normalize_path("/register#form"), "/register");
        assert_eq!(normalize_path("advanced-search"), "/advanced-search");
    }

    #[test]
    fn public_paths_render_for_anyone() {
        let session = scope().use_auth().unwrap();
        let router = Router::campus();

        for (path, screen) in [
            ("/", Screen::Home),
            ("/login", Screen::Login),
            ("/register", Screen::Register),
            ("/advanced-search", Screen::AdvancedSearch),
        ] {
            assert_eq!(router.resolve(path, &session), RenderDecision::Render(screen));
        }
    }

    #[test]
    fn unmatched_paths_render_not_found() {
        let session = scope().use_auth().unwrap();
        let router = Router::campus();

        assert_eq!(
            router.resolve("/professor/grades", &session),
            RenderDecision::Render(Screen::NotFound)
        );
        assert_eq!(
            Router::new(Vec::new()).resolve("/", &session),
            RenderDecision::Render(Screen::NotFound)
        );
    }

    #[test]
    fn first_match_wins() {
        let session = scope().use_auth().unwrap();
        let router = Router::new(vec![
            Route::public("/", Screen::Home),
            Route::public("/", Screen::Login),
            Route::fallback(Screen::NotFound),
            Route::public("/register", Screen::Register),
        ]);

        assert_eq!(router.resolve("/", &session).screen(), Some(Screen::Home));
        assert_eq!(router.resolve("/register", &session).screen(), Some(Screen::NotFound));
    }

    #[test]
    fn only_professor_route_is_guarded() {
        let router = Router::campus();
        let guarded: Vec<_> = router
            .routes()
            .iter()
            .filter(|route| route.policy().is_some())
            .map(|route| route.screen())
            .collect();

        assert_eq!(guarded, vec![Screen::ProfessorDashboard]);
        assert_eq!(
            router.route_for("/professor").and_then(Route::policy),
            Some(&RoutePolicy::staff())
        );
    }

    #[test]
    fn navigator_replaces_redirected_entry() {
        let scope = scope();
        let mut nav = Navigator::new(Router::campus(), &scope).unwrap();

        nav.navigate("/").unwrap();
        let screen = nav.navigate("/professor").unwrap();

        assert_eq!(screen, Screen::Login);
        assert_eq!(nav.entries().to_vec(), vec!["/".to_string(), "/login".to_string()]);
        assert_eq!(nav.current(), Some("/login"));
    }

    #[test]
    fn navigator_history_is_bounded() {
        let scope = scope();
        let mut nav = Navigator::new(Router::campus(), &scope).unwrap();

        for i in 0..MAX_HISTORY + 10 {
            nav.navigate(&format!("/page-{i}")).unwrap();
        }

        assert_eq!(nav.entries().len(), MAX_HISTORY);
        assert_eq!(nav.entries().first().map(String::as_str), Some("/page-10"));
        assert_eq!(nav.current(), Some(format!("/page-{}", MAX_HISTORY + 9).as_str()));
    }

    #[test]
    fn navigator_requires_installed_session() {
        let err = Navigator::new(Router::campus(), &Scope::root()).unwrap_err();
        assert_eq!(err, SessionError::ContextUnavailable);
    }

    #[test]
    fn redirect_loop_is_reported() {
        let scope = scope();
        scope.use_auth().unwrap().login("ana", Role::General).unwrap();

        let bounce = RoutePolicy::new([Role::Admin], "/a").unwrap();
        let router = Router::new(vec![
            Route::guarded("/a", Screen::Home, bounce),
            Route::fallback(Screen::NotFound),
        ]);
        let mut nav = Navigator::new(router, &scope).unwrap();

        let err = nav.navigate("/a").unwrap_err();
        assert_eq!(
            err,
            RouterError::RedirectLoop {
                path: "/a".to_string(),
                hops: MAX_REDIRECTS,
            }
        );
    }
}
