//! Leptos application shell.
//!
//! Leptos only supplies the current location; which screen renders (and
//! which policy guards it) comes from [`crate::router::Router::campus`].

use leptos::*;
use leptos_router::*;

use campus_auth::{DemoUser, Role};

use crate::config::WebConfig;
use crate::frontend::auth::{AuthProvider, Protected, expect_auth};
use crate::router::{Router as CampusRouter, Screen};
use crate::session::Session;
use crate::storage::LocalStorage;
use crate::store::IdentityStore;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = WebConfig::from_build_env().unwrap_or_else(|err| {
        logging::error!("{err}; falling back to default configuration");
        WebConfig::default()
    });
    let store = IdentityStore::new(LocalStorage, config.storage_key.clone());
    let session = Session::start(store, config.session_mode());

    view! {
        <AuthProvider session=session>
            <Router>
                <SessionBar/>
                <main>
                    <Routes>
                        <Route path="/*any" view=Shell/>
                    </Routes>
                </main>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let router = CampusRouter::campus();
    let location = use_location();

    move || {
        let path = location.pathname.get();
        let Some(route) = router.route_for(&path) else {
            return screen_view(Screen::NotFound);
        };
        let screen = route.screen();

        match route.policy().cloned() {
            Some(policy) => view! {
                <Protected screen=screen policy=policy>
                    {move || screen_view(screen)}
                </Protected>
            }
            .into_view(),
            None => screen_view(screen),
        }
    }
}

fn screen_view(screen: Screen) -> View {
    match screen {
        Screen::Home => view! { <HomePage/> }.into_view(),
        Screen::Login => view! { <LoginPage/> }.into_view(),
        Screen::Register => view! {
            <section class="register">
                <h2>"Register"</h2>
                <p>"Account requests are reviewed by the registrar."</p>
            </section>
        }
        .into_view(),
        Screen::AdvancedSearch => view! {
            <section class="advanced-search">
                <h2>"Advanced search"</h2>
            </section>
        }
        .into_view(),
        Screen::ProfessorDashboard => view! { <ProfessorDashboard/> }.into_view(),
        Screen::NotFound => view! {
            <section class="not-found">
                <h2>"Page not found"</h2>
                <A href="/">"Back to home"</A>
            </section>
        }
        .into_view(),
    }
}

#[component]
fn SessionBar() -> impl IntoView {
    let auth = expect_auth();

    view! {
        <header>
            <nav>
                <A href="/">"Home"</A>
                <A href="/advanced-search">"Advanced search"</A>
                <A href="/professor">"Professors"</A>
            </nav>
            <div class="session">
                {move || {
                    let auth = auth.clone();
                    match auth.user() {
                        Some(user) => {
                            let label = format!("{} ({})", user.username(), user.role());
                            view! {
                                <span class="user">{label}</span>
                                <button on:click=move |_| auth.logout()>"Sign out"</button>
                            }
                            .into_view()
                        }
                        None => view! { <A href="/login">"Sign in"</A> }.into_view(),
                    }
                }}
            </div>
        </header>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <section class="home">
            <h1>"Campus"</h1>
            <p>"Search the catalogue or sign in to reach staff tools."</p>
        </section>
    }
}

#[component]
fn ProfessorDashboard() -> impl IntoView {
    let auth = expect_auth();

    view! {
        <section class="professor">
            <h2>"Professor dashboard"</h2>
            <p>
                {move || auth.user().map(|u| format!("Signed in as {}", u.username())).unwrap_or_default()}
            </p>
        </section>
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    let auth = expect_auth();
    let navigate = use_navigate();
    let username = create_rw_signal(String::new());
    let role = create_rw_signal(Role::General);
    let error = create_rw_signal(None::<String>);

    let sign_in = move |name: String, role: Role| match auth.login(&name, role) {
        Ok(_) => {
            error.set(None);
            navigate("/", Default::default());
        }
        Err(err) => error.set(Some(err.to_string())),
    };

    let submit = sign_in.clone();

    view! {
        <section class="login">
            <h2>"Sign in"</h2>
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                submit(username.get(), role.get());
            }>
                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="role">"Role"</label>
                    <select
                        id="role"
                        on:change=move |ev| {
                            if let Ok(parsed) = event_target_value(&ev).parse::<Role>() {
                                role.set(parsed);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| {
                                view! {
                                    <option value=r.as_str() selected=move || role.get() == r>
                                        {r.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <button type="submit">"Sign in"</button>
            </form>
            {move || error.get().map(|msg| view! { <p class="error">{msg}</p> })}
            <div class="quick-select">
                {DemoUser::ALL
                    .into_iter()
                    .map(|demo| {
                        let sign_in = sign_in.clone();
                        let preset = demo.user();
                        view! {
                            <button on:click=move |_| sign_in(preset.username().to_string(), preset.role())>
                                {format!("Continue as {}", demo.key())}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
