//! Preset identities for evaluation and demo deployments.
//!
//! These only matter when a deployment runs in fixed-default mode; a
//! standard deployment never consults them.

use core::str::FromStr;

use campus_core::DomainError;

use crate::{Role, User, Username};

/// One of the preset demo identities, keyed by role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DemoUser {
    Admin,
    Professor,
    General,
}

impl DemoUser {
    pub const ALL: [DemoUser; 3] = [DemoUser::Admin, DemoUser::Professor, DemoUser::General];

    /// Directory key used to select this preset at login or in configuration.
    pub fn key(&self) -> &'static str {
        self.role().as_str()
    }

    pub fn role(&self) -> Role {
        match self {
            DemoUser::Admin => Role::Admin,
            DemoUser::Professor => Role::Professor,
            DemoUser::General => Role::General,
        }
    }

    fn username(&self) -> &'static str {
        match self {
            DemoUser::Admin => "admin",
            DemoUser::Professor => "professor",
            DemoUser::General => "usuario",
        }
    }

    pub fn user(&self) -> User {
        // Preset usernames are non-empty literals.
        User::new(Username(self.username().to_string()), self.role())
    }

    /// Look up a preset by directory key. Legacy role names (`geral`) are
    /// accepted too.
    pub fn lookup(key: &str) -> Option<DemoUser> {
        let role = key.parse::<Role>().ok()?;
        Self::ALL.into_iter().find(|demo| demo.role() == role)
    }
}

impl FromStr for DemoUser {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown demo user '{}'", s.trim())))
    }
}
