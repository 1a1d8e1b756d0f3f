use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Role carried by a verified actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// Platform owner, implicitly unrestricted.
    SuperAdmin,
    /// Restricted administrator.
    SubAdmin,
    /// Restricted content moderator.
    Moderator,
    /// Restricted support agent.
    Support,
}

impl ActorRole {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::SubAdmin => "SUB_ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Support => "SUPPORT",
        }
    }
}

/// Actor information resolved from a verified session token.
///
/// Only the session verification collaborator produces this value; the
/// console reads it to gate rendering and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
    role: ActorRole,
    permissions: BTreeSet<String>,
    is_active: bool,
}

impl ActorIdentity {
    /// Creates an actor identity from verified session data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        role: ActorRole,
        permissions: impl IntoIterator<Item = String>,
        is_active: bool,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            role,
            permissions: permissions.into_iter().collect(),
            is_active,
        }
    }

    /// Returns the stable subject claim from the auth service.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current actor.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the auth service returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the actor role.
    #[must_use]
    pub fn role(&self) -> ActorRole {
        self.role
    }

    /// Returns the granted leaf permission ids.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// Returns whether the account behind this session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether the actor is an unrestricted super-admin.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == ActorRole::SuperAdmin
    }

    /// Flat membership check. Inactive actors hold nothing.
    #[must_use]
    pub fn holds(&self, leaf_id: &str) -> bool {
        self.is_active && (self.is_super_admin() || self.permissions.contains(leaf_id))
    }
}
