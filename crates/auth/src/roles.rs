use core::str::FromStr;

use serde::{Deserialize, Serialize};

use campus_core::DomainError;

/// Role used for screen access.
///
/// The set is closed: anything outside it cannot be constructed, so policy
/// checks never compare free-form strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Professor,
    /// Legacy builds persisted this role as `"geral"`; accepted on read only.
    #[serde(alias = "geral")]
    General,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Professor, Role::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professor => "professor",
            Role::General => "general",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "professor" => Ok(Role::Professor),
            "general" | "geral" => Ok(Role::General),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
