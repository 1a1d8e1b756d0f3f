use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use eventdesk_application::SessionContext;
use eventdesk_core::{AppError, AppResult};
use tower_sessions::Session;

/// Server-side session key holding the auth service bearer token.
pub const SESSION_TOKEN_KEY: &str = "eventdesk.bearer_token";

/// Request-scoped view of the server-side session.
///
/// A sign-in redirect is recorded here and turned into the HTTP response by
/// the session middleware.
#[derive(Debug)]
pub struct TowerSessionContext {
    session: Session,
    redirects: AtomicUsize,
}

impl TowerSessionContext {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            redirects: AtomicUsize::new(0),
        }
    }

    /// Number of sign-in redirects recorded for this request.
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }

    /// Stores a freshly issued token, rotating the session id.
    pub async fn store_token(&self, token: &str) -> AppResult<()> {
        self.session
            .cycle_id()
            .await
            .map_err(|error| AppError::Internal(format!("failed to rotate session: {error}")))?;
        self.session
            .insert(SESSION_TOKEN_KEY, token.to_owned())
            .await
            .map_err(|error| AppError::Internal(format!("failed to store session token: {error}")))
    }
}

#[async_trait]
impl SessionContext for TowerSessionContext {
    async fn token(&self) -> AppResult<Option<String>> {
        self.session
            .get::<String>(SESSION_TOKEN_KEY)
            .await
            .map(|token| token.filter(|value| !value.trim().is_empty()))
            .map_err(|error| AppError::Internal(format!("failed to read session token: {error}")))
    }

    async fn clear_token(&self) -> AppResult<()> {
        self.session
            .remove::<String>(SESSION_TOKEN_KEY)
            .await
            .map(|_| ())
            .map_err(|error| AppError::Internal(format!("failed to clear session token: {error}")))
    }

    async fn redirect_to_sign_in(&self) -> AppResult<()> {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_redirected(&self) -> bool {
        self.redirect_count() > 0
    }
}
