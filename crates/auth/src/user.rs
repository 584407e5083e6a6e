//! Signed-in identity.
//!
//! A `User` is a value object: once constructed it never changes, and a role
//! change means issuing a new `User`. Persisted identities are decoded into a
//! raw [`UserRecord`] first and only become a `User` after validation.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use campus_core::{DomainError, DomainResult, ValueObject};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Username
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque, non-empty user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(pub(crate) String);

impl Username {
    /// Validate and trim a username.
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// The identity currently using the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord", into = "UserRecord")]
pub struct User {
    username: Username,
    role: Role,
}

impl User {
    pub fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    /// Build a user from an unvalidated username.
    pub fn parse(username: &str, role: Role) -> DomainResult<Self> {
        Ok(Self::new(Username::new(username)?, role))
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Issue a new identity with a different role.
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            username: self.username.clone(),
            role,
        }
    }
}

impl ValueObject for User {}

/// Wire shape of a persisted identity: `{"username": "...", "role": "..."}`.
///
/// Only a JSON object decodes into this record; sequences and scalars are
/// rejected. Anything that decodes still has to pass `User::try_from` before
/// it is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub username: String,
    pub role: Role,
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UserRecordVisitor)
    }
}

struct UserRecordVisitor;

impl<'de> Visitor<'de> for UserRecordVisitor {
    type Value = UserRecord;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("an object with `username` and `role` fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<UserRecord, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut username: Option<String> = None;
        let mut role: Option<Role> = None;

        while let Some(field) = map.next_key::<String>()? {
            match field.as_str() {
                "username" if username.is_some() => return Err(de::Error::duplicate_field("username")),
                "username" => username = Some(map.next_value()?),
                "role" if role.is_some() => return Err(de::Error::duplicate_field("role")),
                "role" => role = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(UserRecord {
            username: username.ok_or_else(|| de::Error::missing_field("username"))?,
            role: role.ok_or_else(|| de::Error::missing_field("role"))?,
        })
    }
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::parse(&record.username, record.role)
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            username: user.username.0,
            role: user.role,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
