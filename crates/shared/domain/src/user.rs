//! User domain entity and related types.


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    ROLE_MODERATOR, ROLE_USER, STATUS_CREATED, STATUS_DELETED, STATUS_UPDATED,
};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Moderator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Moderator => ROLE_MODERATOR,
        }
    }
}

/// Lenient conversion used for stored values; unknown roles fall back to `user`.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_MODERATOR => UserRole::Moderator,
            _ => UserRole::User,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last lifecycle transition applied to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Created,
    Updated,
    Deleted,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Created => STATUS_CREATED,
            UserStatus::Updated => STATUS_UPDATED,
            UserStatus::Deleted => STATUS_DELETED,
        }
    }
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_UPDATED => UserStatus::Updated,
            STATUS_DELETED => UserStatus::Deleted,
            _ => UserStatus::Created,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-assigned user identifier.
///
/// Parsing is the only way to obtain one from caller input, so a malformed
/// identifier is rejected before any store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse caller-supplied input.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::InvalidId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub phone_number: String,
    pub address: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Subject of the principal that created the record
    pub created_by: String,
    pub status: UserStatus,
}

/// Fields supplied to a create operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub phone_number: String,
    pub address: String,
    pub role: Option<String>,
    pub referral_code: Option<String>,
}

/// Partial update: only `Some` fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub referral_code: Option<String>,
}

impl UserPatch {
    /// True when no updatable field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.role.is_none()
            && self.referral_code.is_none()
    }
}

/// Validated candidate handed to the repository for insertion.
///
/// The repository assigns `id`, `created_at` and `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub phone_number: String,
    pub address: String,
    pub role: UserRole,
    pub referral_code: Option<String>,
    pub created_by: String,
}

impl UserDraft {
    /// Build a draft from already-validated input, applying the default role.
    pub fn new(input: NewUser, created_by: impl Into<String>) -> Self {
        Self {
            role: input.role.as_deref().map(UserRole::from).unwrap_or_default(),
            name: input.name,
            email: input.email,
            age: input.age,
            phone_number: input.phone_number,
            address: input.address,
            referral_code: input.referral_code,
            created_by: created_by.into(),
        }
    }
}

/// Result of a delete: only the identifier survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedUser {
    pub id: UserId,
    pub status: UserStatus,
}

impl DeletedUser {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            status: UserStatus::Deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse_valid() {
        let raw = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
        let id = UserId::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_user_id_parse_malformed() {
        let result = UserId::parse("not-an-id");
        assert_eq!(result, Err(DomainError::InvalidId("not-an-id".to_string())));
    }

    #[test]
    fn test_user_id_parse_rejects_padding() {
        for raw in [
            " 7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "7c9e6679-7425-40de-944b-e07fc1f90ae7 ",
            "\t7c9e6679-7425-40de-944b-e07fc1f90ae7\n",
        ] {
            assert!(
                matches!(UserId::parse(raw), Err(DomainError::InvalidId(_))),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_role_from_str_falls_back_to_user() {
        assert_eq!(UserRole::from("moderator"), UserRole::Moderator);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("admin"), UserRole::User);
    }

    #[test]
    fn test_draft_defaults_role() {
        let input = NewUser {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            age: 30,
            phone_number: "+15551234567".to_string(),
            address: "123 Main Street".to_string(),
            role: None,
            referral_code: None,
        };

        let draft = UserDraft::new(input, "user-1");
        assert_eq!(draft.role, UserRole::User);
        assert_eq!(draft.created_by, "user-1");
    }

    #[test]
    fn test_empty_patch() {
        assert!(UserPatch::default().is_empty());

        let patch = UserPatch {
            age: Some(40),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
