//! `campus-auth` — identity and route-access policy (no IO).
//!
//! This crate is intentionally decoupled from storage and the browser: it
//! models *who* is signed in and *which* screens a role may reach. Obtaining
//! and verifying that identity is the surrounding system's job.

pub mod authorize;
pub mod demo;
pub mod roles;
pub mod user;

pub use authorize::{AccessDenied, RoutePolicy, authorize_route};
pub use demo::DemoUser;
pub use roles::Role;
pub use user::{User, UserRecord, Username};
