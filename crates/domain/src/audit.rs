use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a sub-admin account is created.
    SubAdminCreated,
    /// Emitted when a sub-admin account is edited.
    SubAdminUpdated,
    /// Emitted when a sub-admin account is deleted.
    SubAdminDeleted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubAdminCreated => "sub_admin.created",
            Self::SubAdminUpdated => "sub_admin.updated",
            Self::SubAdminDeleted => "sub_admin.deleted",
        }
    }
}
