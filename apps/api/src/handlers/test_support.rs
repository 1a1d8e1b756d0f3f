use std::sync::Arc;

use async_trait::async_trait;
use eventdesk_application::{
    AUTHENTICATION_FAILED_SIGNAL, AccessGate, SessionVerifier, SubAdminService,
};
use eventdesk_core::{ActorIdentity, ActorRole, AppError, AppResult};
use eventdesk_infrastructure::{
    Argon2PasswordHasher, InMemoryAuditRepository, InMemorySubAdminRepository,
};
use tower_sessions::{MemoryStore, Session};

use crate::session_context::TowerSessionContext;
use crate::state::AppState;

pub(crate) const VALID_TOKEN: &str = "valid-token";

struct FakeSessionVerifier {
    actor: ActorIdentity,
}

#[async_trait]
impl SessionVerifier for FakeSessionVerifier {
    async fn verify(&self, token: &str) -> AppResult<ActorIdentity> {
        if token == VALID_TOKEN {
            return Ok(self.actor.clone());
        }

        Err(AppError::Unauthorized(format!(
            "{AUTHENTICATION_FAILED_SIGNAL}: token rejected"
        )))
    }
}

pub(crate) fn super_admin() -> ActorIdentity {
    ActorIdentity::new(
        "root",
        "Root",
        None,
        ActorRole::SuperAdmin,
        Vec::new(),
        true,
    )
}

pub(crate) fn sub_admin(permissions: &[&str]) -> ActorIdentity {
    ActorIdentity::new(
        "ops-1",
        "Ops",
        Some("ops@eventdesk.test".to_owned()),
        ActorRole::SubAdmin,
        permissions.iter().map(|value| (*value).to_owned()),
        true,
    )
}

/// State whose verifier accepts [`VALID_TOKEN`] as `actor`.
pub(crate) fn test_state(actor: ActorIdentity) -> AppState {
    AppState {
        sub_admin_service: SubAdminService::new(
            Arc::new(InMemorySubAdminRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(InMemoryAuditRepository::new()),
        ),
        access_gate: AccessGate::new(Arc::new(FakeSessionVerifier { actor })),
        frontend_url: "http://localhost:3000".to_owned(),
        sign_in_url: "http://localhost:3000/sign-in".to_owned(),
    }
}

pub(crate) fn memory_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

/// Request context for a session that already holds [`VALID_TOKEN`].
pub(crate) async fn signed_in_context() -> Arc<TowerSessionContext> {
    let context = TowerSessionContext::new(memory_session());
    context
        .store_token(VALID_TOKEN)
        .await
        .unwrap_or_else(|_| unreachable!());
    Arc::new(context)
}
