//! Black-box navigation scenarios against the composed application.

use campus_auth::{DemoUser, Role};
use campus_web::{App, FileStorage, MemoryStorage, Screen, StorageBackend, WebConfig};

fn app(storage: &MemoryStorage) -> App {
    App::compose(&WebConfig::default(), storage.clone()).unwrap()
}

#[test]
fn anonymous_visitor_is_sent_to_login() {
    let mut app = app(&MemoryStorage::new());

    let screen = app.navigator_mut().navigate("/professor").unwrap();

    assert_eq!(screen, Screen::Login);
    assert_eq!(app.navigator().current(), Some("/login"));
}

#[test]
fn general_visitor_is_sent_home() {
    let mut app = app(&MemoryStorage::new());
    app.session().login("ana", Role::General).unwrap();

    let screen = app.navigator_mut().navigate("/professor").unwrap();

    assert_eq!(screen, Screen::Home);
    assert_eq!(app.navigator().current(), Some("/"));
}

#[test]
fn professor_and_admin_reach_dashboard() {
    for role in [Role::Professor, Role::Admin] {
        let mut app = app(&MemoryStorage::new());
        app.session().login("ana", role).unwrap();

        let screen = app.navigator_mut().navigate("/professor").unwrap();

        assert_eq!(screen, Screen::ProfessorDashboard);
        assert_eq!(app.navigator().entries().to_vec(), vec!["/professor".to_string()]);
    }
}

#[test]
fn public_pages_and_not_found() {
    let mut app = app(&MemoryStorage::new());
    let nav = app.navigator_mut();

    assert_eq!(nav.navigate("/").unwrap(), Screen::Home);
    assert_eq!(nav.navigate("/register").unwrap(), Screen::Register);
    assert_eq!(nav.navigate("/advanced-search?q=rust").unwrap(), Screen::AdvancedSearch);
    assert_eq!(nav.navigate("/nowhere").unwrap(), Screen::NotFound);
}

#[test]
fn logout_revokes_access_on_next_navigation() {
    let mut app = app(&MemoryStorage::new());
    app.session().login("ana", Role::Professor).unwrap();
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::ProfessorDashboard);

    app.session().logout();

    assert!(!app.session().is_authenticated());
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::Login);
}

#[test]
fn session_survives_reload() {
    let storage = MemoryStorage::new();
    app(&storage).session().login("prof.silva", Role::Professor).unwrap();

    let reloaded = app(&storage);
    let user = reloaded.session().user().unwrap();

    assert_eq!(user.username().as_str(), "prof.silva");
    assert_eq!(user.role(), Role::Professor);
}

#[test]
fn tampered_storage_reloads_anonymous() {
    let storage = MemoryStorage::new();
    storage
        .set("user", r#"{"username":"mallory","role":"superadmin"}"#)
        .unwrap();

    let mut app = app(&storage);

    assert!(!app.session().is_authenticated());
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::Login);
}

#[test]
fn array_payload_is_not_an_identity() {
    let storage = MemoryStorage::new();
    storage.set("user", r#"["mallory","admin"]"#).unwrap();

    let mut app = app(&storage);

    assert_eq!(app.session().user(), None);
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::Login);
}

#[test]
fn fixed_default_login_keeps_requested_role() {
    let config = WebConfig {
        fixed_default_user: Some(DemoUser::General),
        ..WebConfig::default()
    };
    let app = App::compose(&config, MemoryStorage::new()).unwrap();

    for name in ["admin", "professor", "general"] {
        for role in Role::ALL {
            let user = app.session().login(name, role).unwrap();
            assert_eq!((user.username().as_str(), user.role()), (name, role));
        }
    }
}

#[test]
fn fixed_default_mode_never_goes_anonymous() {
    let config = WebConfig {
        fixed_default_user: Some(DemoUser::Admin),
        ..WebConfig::default()
    };
    let mut app = App::compose(&config, MemoryStorage::new()).unwrap();

    app.session().login("general", Role::General).unwrap();
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::Home);

    app.session().logout();
    assert_eq!(app.session().user(), Some(DemoUser::Admin.user()));
    assert_eq!(app.navigator_mut().navigate("/professor").unwrap(), Screen::ProfessorDashboard);
}

#[test]
fn file_storage_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = WebConfig {
        storage_key: "campus-user".to_string(),
        ..WebConfig::default()
    };

    App::compose(&config, FileStorage::new(dir.path()))
        .unwrap()
        .session()
        .login("ana", Role::Admin)
        .unwrap();

    let restarted = App::compose(&config, FileStorage::new(dir.path())).unwrap();
    assert_eq!(restarted.session().user().map(|u| u.role()), Some(Role::Admin));
}
