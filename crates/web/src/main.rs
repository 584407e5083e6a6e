//! Native driver: replays a session script against the composed application.
//!
//! ```text
//! campus login ana professor visit /professor logout visit /professor whoami
//! ```
//!
//! Configuration comes from `CAMPUS_*` environment variables; logs go to
//! stderr as JSON (filter with `RUST_LOG`).

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, bail};
#[cfg(not(target_arch = "wasm32"))]
use campus_auth::Role;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { username: String, role: Role },
    Logout,
    Visit { path: String },
    Whoami,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_script(args: &[String]) -> anyhow::Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut args = args.iter();

    while let Some(word) = args.next() {
        let command = match word.as_str() {
            "login" => {
                let username = args.next().context("login needs <username> <role>")?;
                let role = args
                    .next()
                    .context("login needs <username> <role>")?
                    .parse::<Role>()?;
                Command::Login {
                    username: username.clone(),
                    role,
                }
            }
            "logout" => Command::Logout,
            "visit" => Command::Visit {
                path: args.next().context("visit needs <path>")?.clone(),
            },
            "whoami" => Command::Whoami,
            other => bail!("unknown command '{other}' (expected login, logout, visit, whoami)"),
        };
        commands.push(command);
    }

    Ok(commands)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use campus_web::{App, WebConfig};

    campus_observability::init();

    let config = WebConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let script = parse_script(&args)?;

    let mut app = App::compose_native(&config)?;

    for command in script {
        match command {
            Command::Login { username, role } => {
                let user = app.session().login(&username, role)?;
                println!("login    {} ({})", user.username(), user.role());
            }
            Command::Logout => {
                app.session().logout();
                match app.session().user() {
                    Some(user) => println!("logout   -> {} ({})", user.username(), user.role()),
                    None => println!("logout   -> anonymous"),
                }
            }
            Command::Visit { path } => {
                let screen = app.navigator_mut().navigate(&path)?;
                let landed = app.navigator().current().unwrap_or("/");
                println!("visit    {path} -> {landed} [{screen}]");
            }
            Command::Whoami => match app.session().user() {
                Some(user) => println!("whoami   {} ({})", user.username(), user.role()),
                None => println!("whoami   anonymous"),
            },
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build starts from `campus_web::frontend`.
}
