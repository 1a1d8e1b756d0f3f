//! Sub-admin account types and validation rules.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use eventdesk_core::{ActorRole, AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::taxonomy::PERMISSION_TAXONOMY;

/// Minimum length for a newly chosen password.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum password length (bounds Argon2id hashing cost).
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Unique identifier for a sub-admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubAdminId(Uuid);

impl SubAdminId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubAdminId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubAdminId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for SubAdminId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid sub-admin id '{value}': {error}")))
    }
}

/// Role tag of a sub-admin account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubAdminRole {
    /// General restricted administrator.
    #[default]
    SubAdmin,
    /// Content moderator.
    Moderator,
    /// Support agent.
    Support,
}

impl SubAdminRole {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubAdmin => "SUB_ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Support => "SUPPORT",
        }
    }

    /// Returns every role in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::SubAdmin, Self::Moderator, Self::Support]
    }
}

impl FromStr for SubAdminRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SUB_ADMIN" => Ok(Self::SubAdmin),
            "MODERATOR" => Ok(Self::Moderator),
            "SUPPORT" => Ok(Self::Support),
            _ => Err(AppError::Validation(format!(
                "unknown sub-admin role '{value}'"
            ))),
        }
    }
}

impl From<SubAdminRole> for ActorRole {
    fn from(value: SubAdminRole) -> Self {
        match value {
            SubAdminRole::SubAdmin => Self::SubAdmin,
            SubAdminRole::Moderator => Self::Moderator,
            SubAdminRole::Support => Self::Support,
        }
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Structural checks only: exactly one `@`, non-empty local part, and a
    /// domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Persisted sub-admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubAdminAccount {
    /// Server-assigned identifier.
    pub id: SubAdminId,
    /// Display name.
    pub name: String,
    /// Unique, lower-cased email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Role tag.
    pub role: SubAdminRole,
    /// Granted leaf permission ids.
    pub permissions: BTreeSet<String>,
    /// Inactive accounts are denied all access.
    pub is_active: bool,
    /// Argon2id hash. Write-only from the caller's perspective.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Subject of the actor that created the account.
    pub created_by: String,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields shared by create and update after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubAdminFields {
    /// Trimmed display name.
    pub name: NonEmptyString,
    /// Validated email.
    pub email: EmailAddress,
    /// Phone, `None` when blank.
    pub phone: Option<String>,
    /// Validated, de-duplicated leaf ids.
    pub permissions: BTreeSet<String>,
}

/// Input for the add-account operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSubAdminInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Optional phone.
    pub phone: Option<String>,
    /// Role, defaults to `SUB_ADMIN`.
    pub role: Option<SubAdminRole>,
    /// Granted leaf ids. Must not be empty.
    pub permissions: Vec<String>,
}

impl CreateSubAdminInput {
    /// Checks required fields and password bounds.
    ///
    /// Every missing field is listed in one error so the form can mark them
    /// all at once.
    pub fn validate(&self) -> AppResult<SubAdminFields> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        if self.permissions.is_empty() {
            missing.push("permissions");
        }
        ensure_nothing_missing(&missing)?;

        if self.password.chars().count() > PASSWORD_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "password must not exceed {PASSWORD_MAX_LENGTH} characters"
            )));
        }

        validated_fields(&self.name, &self.email, self.phone.as_deref(), &self.permissions)
    }
}

/// Input for the edit operation.
///
/// `id`, `created_at`, and `created_by` are not part of the input and can
/// never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSubAdminInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone, blank clears it.
    pub phone: Option<String>,
    /// New role, `None` keeps the current one.
    pub role: Option<SubAdminRole>,
    /// New active flag, `None` keeps the current one.
    pub is_active: Option<bool>,
    /// New password. Blank keeps the current hash.
    pub password: String,
    /// Must equal `password` when a new password is supplied.
    pub confirm_password: String,
    /// Granted leaf ids. Must not be empty.
    pub permissions: Vec<String>,
}

impl UpdateSubAdminInput {
    /// Checks required fields and, when a new password is supplied, its
    /// length and confirmation.
    pub fn validate(&self) -> AppResult<SubAdminFields> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.permissions.is_empty() {
            missing.push("permissions");
        }
        ensure_nothing_missing(&missing)?;

        if self.changes_password() {
            let length = self.password.chars().count();
            if length < PASSWORD_MIN_LENGTH {
                return Err(AppError::Validation(format!(
                    "password must be at least {PASSWORD_MIN_LENGTH} characters"
                )));
            }
            if length > PASSWORD_MAX_LENGTH {
                return Err(AppError::Validation(format!(
                    "password must not exceed {PASSWORD_MAX_LENGTH} characters"
                )));
            }
            if self.password != self.confirm_password {
                return Err(AppError::Validation(
                    "password and confirmation do not match".to_owned(),
                ));
            }
        }

        validated_fields(&self.name, &self.email, self.phone.as_deref(), &self.permissions)
    }

    /// Returns whether the input replaces the stored password.
    #[must_use]
    pub fn changes_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// Explicit confirmation required before an irreversible delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// The operator confirmed the delete.
    Confirmed,
    /// No confirmation was given.
    Missing,
}

impl DeleteConfirmation {
    /// Maps a transport flag onto a confirmation.
    #[must_use]
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Missing
        }
    }

    /// Fails unless the delete was confirmed.
    pub fn ensure_confirmed(self) -> AppResult<()> {
        match self {
            Self::Confirmed => Ok(()),
            Self::Missing => Err(AppError::Validation(
                "deleting a sub-admin must be explicitly confirmed".to_owned(),
            )),
        }
    }
}

fn ensure_nothing_missing(missing: &[&str]) -> AppResult<()> {
    if missing.is_empty() {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "missing required fields: {}",
        missing.join(", ")
    )))
}

fn validated_fields(
    name: &str,
    email: &str,
    phone: Option<&str>,
    permissions: &[String],
) -> AppResult<SubAdminFields> {
    Ok(SubAdminFields {
        name: NonEmptyString::new(name.trim())?,
        email: EmailAddress::new(email)?,
        phone: phone
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned),
        permissions: PERMISSION_TAXONOMY.validate_leaf_ids(permissions)?,
    })
}
