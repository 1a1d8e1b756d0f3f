use std::sync::Arc;

use eventdesk_core::{ActorIdentity, AppResult};

use crate::failure::is_authentication_failure;
use crate::session_ports::{SessionContext, SessionVerifier};

/// Outcome of checking a session before rendering protected content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The session is valid and the actor may proceed.
    Admitted(ActorIdentity),
    /// The session was cleared and the client sent to sign-in.
    SignedOut,
}

/// Single authority for session checks and forced sign-out.
#[derive(Clone)]
pub struct AccessGate {
    verifier: Arc<dyn SessionVerifier>,
}

impl AccessGate {
    /// Creates an access gate backed by a session verifier.
    #[must_use]
    pub fn new(verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { verifier }
    }

    /// Verifies the persisted token before any protected content is shown.
    ///
    /// A missing token, a rejected token, an unreachable verifier, and an
    /// inactive account all end in a forced sign-out.
    pub async fn admit(&self, session: &dyn SessionContext) -> AppResult<GateDecision> {
        let Some(token) = session.token().await? else {
            self.force_sign_out(session).await?;
            return Ok(GateDecision::SignedOut);
        };

        match self.verifier.verify(token.as_str()).await {
            Ok(actor) if actor.is_active() => Ok(GateDecision::Admitted(actor)),
            Ok(_) | Err(_) => {
                self.force_sign_out(session).await?;
                Ok(GateDecision::SignedOut)
            }
        }
    }

    /// Inspects the result of a protected operation and signs the client out
    /// when it failed for authentication reasons. The result is returned
    /// unchanged so callers can stop processing it.
    pub async fn intercept<T>(
        &self,
        session: &dyn SessionContext,
        result: AppResult<T>,
    ) -> AppResult<T> {
        if let Err(error) = &result
            && is_authentication_failure(error)
        {
            self.force_sign_out(session).await?;
        }

        result
    }

    /// Clears the persisted token and redirects to sign-in once.
    pub async fn force_sign_out(&self, session: &dyn SessionContext) -> AppResult<()> {
        session.clear_token().await?;
        if !session.is_redirected() {
            session.redirect_to_sign_in().await?;
        }

        Ok(())
    }
}
