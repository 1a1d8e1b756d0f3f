use async_trait::async_trait;

use eventdesk_core::{ActorIdentity, AppResult};

/// Port for the external session verification service.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verifies a bearer token and returns the actor behind it.
    ///
    /// A rejected token surfaces as `AppError::Unauthorized`; transport
    /// failures surface as `AppError::Internal`.
    async fn verify(&self, token: &str) -> AppResult<ActorIdentity>;
}

/// Persisted session state and the sign-in redirect for one client.
///
/// Every token read, clear, and redirect goes through the access gate; no
/// other component touches this port directly.
#[async_trait]
pub trait SessionContext: Send + Sync {
    /// Returns the persisted bearer token, if any.
    async fn token(&self) -> AppResult<Option<String>>;

    /// Removes the persisted token. Clearing an absent token is a no-op.
    async fn clear_token(&self) -> AppResult<()>;

    /// Sends the client to the sign-in entry point.
    async fn redirect_to_sign_in(&self) -> AppResult<()>;

    /// Returns whether a sign-in redirect was already issued.
    fn is_redirected(&self) -> bool;
}
