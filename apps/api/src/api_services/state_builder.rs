use std::sync::Arc;

use eventdesk_application::{AccessGate, SubAdminService};
use eventdesk_core::AppError;
use eventdesk_infrastructure::{
    Argon2PasswordHasher, HttpSessionVerifier, PostgresAuditRepository,
    PostgresSubAdminRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.auth_service_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let session_verifier = HttpSessionVerifier::new(http_client, &config.auth_service_url)?;

    let sub_admin_service = SubAdminService::new(
        Arc::new(PostgresSubAdminRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(PostgresAuditRepository::new(pool)),
    );

    Ok(AppState {
        sub_admin_service,
        access_gate: AccessGate::new(Arc::new(session_verifier)),
        frontend_url: config.frontend_url.clone(),
        sign_in_url: config.sign_in_url.clone(),
    })
}
