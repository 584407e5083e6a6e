//! `campus-web`
//!
//! **Responsibility:** client-side session and role-gated navigation.
//!
//! This crate provides:
//! - A durable identity store (memory, file, or browser `localStorage`)
//! - The single session context and the scope that hands it to consumers
//! - Route guards and the application's route table
//!
//! Identities arrive already authenticated; nothing here checks credentials.

pub mod app;
pub mod config;
pub mod guard;
pub mod router;
pub mod scope;
pub mod session;
pub mod storage;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use app::App;
pub use config::{ConfigError, WebConfig};
pub use guard::{LOGIN_PATH, RenderDecision, guard};
pub use router::{Navigator, Route, Router, RouterError, Screen};
pub use scope::{AuthProvider, Scope};
pub use session::{Session, SessionError, SessionHandle, SessionMode, SessionState};
pub use storage::{MemoryStorage, StorageBackend, StorageError};
pub use store::IdentityStore;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
