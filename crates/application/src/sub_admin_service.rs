use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use eventdesk_core::{ActorIdentity, AppError, AppResult};
use eventdesk_domain::{
    AuditAction, CreateSubAdminInput, DeleteConfirmation, SubAdminAccount, SubAdminId,
    UpdateSubAdminInput,
};

use crate::authorization::require_permission;
use crate::sub_admin_ports::{AuditEvent, AuditRepository, PasswordHasher, SubAdminRepository};

/// Leaf required to list and view sub-admins.
pub const SUB_ADMIN_LIST_PERMISSION: &str = "subadmins-all";
/// Leaf required to add sub-admins.
pub const SUB_ADMIN_CREATE_PERMISSION: &str = "subadmins-create";
/// Leaf required to edit sub-admins.
pub const SUB_ADMIN_EDIT_PERMISSION: &str = "subadmins-edit";
/// Leaf required to delete sub-admins.
pub const SUB_ADMIN_DELETE_PERMISSION: &str = "subadmins-delete";

const RESOURCE_TYPE: &str = "sub_admin";

/// Cached listing. Every write bumps `generation`; a fetch only fills the
/// cache when the generation it started from is still current.
#[derive(Debug, Default)]
struct Listing {
    generation: u64,
    accounts: Option<Vec<SubAdminAccount>>,
}

/// Application service for the sub-admin account lifecycle.
#[derive(Clone)]
pub struct SubAdminService {
    repository: Arc<dyn SubAdminRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    audit_repository: Arc<dyn AuditRepository>,
    listing: Arc<RwLock<Listing>>,
}

impl SubAdminService {
    /// Creates a new sub-admin service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn SubAdminRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            audit_repository,
            listing: Arc::new(RwLock::new(Listing::default())),
        }
    }

    /// Lists every sub-admin, served from the cached listing when warm.
    pub async fn list(&self, actor: &ActorIdentity) -> AppResult<Vec<SubAdminAccount>> {
        require_permission(actor, SUB_ADMIN_LIST_PERMISSION)?;

        let generation = {
            let listing = self.listing.read().await;
            if let Some(accounts) = listing.accounts.as_ref() {
                return Ok(accounts.clone());
            }
            listing.generation
        };

        let accounts = self.repository.list().await?;

        let mut listing = self.listing.write().await;
        if listing.generation == generation {
            listing.accounts = Some(accounts.clone());
        }
        Ok(accounts)
    }

    /// Returns one sub-admin for the read-only view.
    pub async fn get(&self, actor: &ActorIdentity, id: SubAdminId) -> AppResult<SubAdminAccount> {
        require_permission(actor, SUB_ADMIN_LIST_PERMISSION)?;
        self.find_existing(id).await
    }

    /// Adds a sub-admin account.
    pub async fn create(
        &self,
        actor: &ActorIdentity,
        input: CreateSubAdminInput,
    ) -> AppResult<SubAdminAccount> {
        require_permission(actor, SUB_ADMIN_CREATE_PERMISSION)?;
        let fields = input.validate()?;

        if self
            .repository
            .find_by_email(fields.email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "a sub-admin with email '{}' already exists",
                fields.email.as_str()
            )));
        }

        let password_hash = self.password_hasher.hash_password(input.password.as_str())?;
        let now = Utc::now();
        let account = SubAdminAccount {
            id: SubAdminId::new(),
            name: fields.name.into(),
            email: fields.email.into(),
            phone: fields.phone,
            role: input.role.unwrap_or_default(),
            permissions: fields.permissions,
            is_active: true,
            password_hash,
            created_at: now,
            created_by: actor.subject().to_owned(),
            updated_at: now,
        };

        let account = self.repository.insert(account).await?;
        self.invalidate_listing().await;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.subject().to_owned(),
                action: AuditAction::SubAdminCreated,
                resource_type: RESOURCE_TYPE.to_owned(),
                resource_id: account.id.to_string(),
                detail: Some(format!(
                    "created sub-admin '{}' with {} permissions",
                    account.email,
                    account.permissions.len()
                )),
            })
            .await?;

        Ok(account)
    }

    /// Edits a sub-admin account. Identity and provenance fields are kept.
    pub async fn update(
        &self,
        actor: &ActorIdentity,
        id: SubAdminId,
        input: UpdateSubAdminInput,
    ) -> AppResult<SubAdminAccount> {
        require_permission(actor, SUB_ADMIN_EDIT_PERMISSION)?;
        let fields = input.validate()?;
        let existing = self.find_existing(id).await?;

        if let Some(other) = self
            .repository
            .find_by_email(fields.email.as_str())
            .await?
            && other.id != existing.id
        {
            return Err(AppError::Conflict(format!(
                "a sub-admin with email '{}' already exists",
                fields.email.as_str()
            )));
        }

        let password_hash = if input.changes_password() {
            self.password_hasher.hash_password(input.password.as_str())?
        } else {
            existing.password_hash.clone()
        };

        let account = SubAdminAccount {
            id: existing.id,
            name: fields.name.into(),
            email: fields.email.into(),
            phone: fields.phone,
            role: input.role.unwrap_or(existing.role),
            permissions: fields.permissions,
            is_active: input.is_active.unwrap_or(existing.is_active),
            password_hash,
            created_at: existing.created_at,
            created_by: existing.created_by.clone(),
            updated_at: Utc::now(),
        };

        let account = self.repository.update(account).await?;
        self.invalidate_listing().await;

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.subject().to_owned(),
                action: AuditAction::SubAdminUpdated,
                resource_type: RESOURCE_TYPE.to_owned(),
                resource_id: account.id.to_string(),
                detail: Some(format!(
                    "updated sub-admin '{}'{}",
                    account.email,
                    if input.changes_password() {
                        " and reset password"
                    } else {
                        ""
                    }
                )),
            })
            .await?;

        Ok(account)
    }

    /// Deletes a sub-admin permanently. Requires explicit confirmation.
    pub async fn delete(
        &self,
        actor: &ActorIdentity,
        id: SubAdminId,
        confirmation: DeleteConfirmation,
    ) -> AppResult<()> {
        require_permission(actor, SUB_ADMIN_DELETE_PERMISSION)?;
        confirmation.ensure_confirmed()?;

        self.repository.delete(id).await?;

        {
            let mut listing = self.listing.write().await;
            listing.generation += 1;
            if let Some(accounts) = listing.accounts.as_mut() {
                accounts.retain(|account| account.id != id);
            }
        }

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.subject().to_owned(),
                action: AuditAction::SubAdminDeleted,
                resource_type: RESOURCE_TYPE.to_owned(),
                resource_id: id.to_string(),
                detail: None,
            })
            .await?;

        Ok(())
    }

    async fn find_existing(&self, id: SubAdminId) -> AppResult<SubAdminAccount> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sub-admin '{id}' does not exist")))
    }

    async fn invalidate_listing(&self) {
        let mut listing = self.listing.write().await;
        listing.generation += 1;
        listing.accounts = None;
    }
}
