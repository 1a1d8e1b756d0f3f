use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use eventdesk_application::{AuditEvent, AuditRepository, SubAdminRepository};
use eventdesk_core::{AppError, AppResult};
use eventdesk_domain::{SubAdminAccount, SubAdminId};

/// In-memory sub-admin repository implementation.
#[derive(Debug, Default)]
pub struct InMemorySubAdminRepository {
    accounts: RwLock<HashMap<SubAdminId, SubAdminAccount>>,
}

impl InMemorySubAdminRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_email_free(
    accounts: &HashMap<SubAdminId, SubAdminAccount>,
    email: &str,
    owner: SubAdminId,
) -> AppResult<()> {
    let taken = accounts
        .values()
        .any(|account| account.id != owner && account.email.eq_ignore_ascii_case(email));

    if taken {
        return Err(AppError::Conflict(format!(
            "a sub-admin with email '{email}' already exists"
        )));
    }

    Ok(())
}

#[async_trait]
impl SubAdminRepository for InMemorySubAdminRepository {
    async fn list(&self) -> AppResult<Vec<SubAdminAccount>> {
        let mut accounts: Vec<SubAdminAccount> =
            self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.email.cmp(&right.email))
        });

        Ok(accounts)
    }

    async fn find_by_id(&self, id: SubAdminId) -> AppResult<Option<SubAdminAccount>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubAdminAccount>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.id) {
            return Err(AppError::Conflict(format!(
                "sub-admin '{}' already exists",
                account.id
            )));
        }
        ensure_email_free(&accounts, account.email.as_str(), account.id)?;

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AppError::NotFound(format!(
                "sub-admin '{}' does not exist",
                account.id
            )));
        }
        ensure_email_free(&accounts, account.email.as_str(), account.id)?;

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: SubAdminId) -> AppResult<()> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("sub-admin '{id}' does not exist")))
    }
}

/// In-memory audit trail, used by local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event in append order.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
