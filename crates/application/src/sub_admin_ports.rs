use async_trait::async_trait;

use eventdesk_core::AppResult;
use eventdesk_domain::{AuditAction, SubAdminAccount, SubAdminId};

/// Repository port for sub-admin persistence.
#[async_trait]
pub trait SubAdminRepository: Send + Sync {
    /// Lists every sub-admin account.
    async fn list(&self) -> AppResult<Vec<SubAdminAccount>>;

    /// Finds an account by identifier.
    async fn find_by_id(&self, id: SubAdminId) -> AppResult<Option<SubAdminAccount>>;

    /// Finds an account by its lower-cased email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubAdminAccount>>;

    /// Persists a new account. Fails with `Conflict` on a duplicate email.
    async fn insert(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount>;

    /// Replaces a stored account. Fails with `NotFound` when it is gone and
    /// `Conflict` when the new email is taken.
    async fn update(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount>;

    /// Removes an account permanently. Fails with `NotFound` when absent.
    async fn delete(&self, id: SubAdminId) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;
}

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Subject that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
