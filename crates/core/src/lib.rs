//! `campus-core` — foundation building blocks shared by the session and
//! navigation crates.
//!
//! This crate contains **pure** primitives (no storage, no browser concerns).

pub mod error;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
