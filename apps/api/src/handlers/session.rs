use axum::Json;
use axum::extract::{Extension, State};
use axum::response::{IntoResponse, Response};
use eventdesk_application::GateDecision;
use eventdesk_core::{ActorIdentity, AppError};
use eventdesk_domain::NavigationState;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{
    AdoptSessionRequest, DashboardBootstrapResponse, SessionResponse, SignedOutResponse,
};
use crate::error::ApiResult;
use crate::middleware::{SignOutStyle, signed_out_response};
use crate::session_context::TowerSessionContext;
use crate::state::AppState;

/// Stores a bearer token issued by the auth service and verifies it right
/// away. A rejected token leaves the session signed out.
pub async fn adopt_session_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AdoptSessionRequest>,
) -> ApiResult<Response> {
    let token = payload.token.trim();
    if token.is_empty() {
        return Err(AppError::Validation("token is required".to_owned()).into());
    }

    let context = TowerSessionContext::new(session);
    context.store_token(token).await?;

    match state.access_gate.admit(&context).await? {
        GateDecision::Admitted(actor) => {
            info!(subject = %actor.subject(), "session adopted");
            Ok(Json(SessionResponse::from(&actor)).into_response())
        }
        GateDecision::SignedOut => {
            warn!("adopted token was rejected");
            Ok(signed_out_response(
                state.sign_in_url.as_str(),
                SignOutStyle::Json,
            ))
        }
    }
}

pub async fn current_session_handler(
    Extension(actor): Extension<ActorIdentity>,
) -> Json<SessionResponse> {
    Json(SessionResponse::from(&actor))
}

pub async fn sign_out_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<SignedOutResponse>> {
    let context = TowerSessionContext::new(session);
    state.access_gate.force_sign_out(&context).await?;

    Ok(Json(SignedOutResponse {
        message: "signed out".to_owned(),
        redirect_to: state.sign_in_url.clone(),
    }))
}

pub async fn dashboard_handler(
    Extension(actor): Extension<ActorIdentity>,
) -> Json<DashboardBootstrapResponse> {
    let navigation = NavigationState::new();

    Json(DashboardBootstrapResponse {
        session: SessionResponse::from(&actor),
        active_section: navigation.active_section().to_owned(),
        active_view: navigation.active_view().as_str().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::{Extension, State};
    use axum::http::StatusCode;
    use eventdesk_application::SessionContext;

    use super::{adopt_session_handler, dashboard_handler, sign_out_handler};
    use crate::dto::AdoptSessionRequest;
    use crate::handlers::test_support::{
        VALID_TOKEN, memory_session, sub_admin, super_admin, test_state,
    };
    use crate::session_context::TowerSessionContext;

    #[tokio::test]
    async fn adopting_a_valid_token_returns_the_session() {
        let state = test_state(super_admin());

        let response = adopt_session_handler(
            State(state),
            memory_session(),
            Json(AdoptSessionRequest {
                token: VALID_TOKEN.to_owned(),
            }),
        )
        .await;

        let Ok(response) = response else {
            panic!("valid token should be adopted");
        };
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn adopting_a_rejected_token_signs_out() {
        let state = test_state(super_admin());
        let session = memory_session();

        let response = adopt_session_handler(
            State(state),
            session.clone(),
            Json(AdoptSessionRequest {
                token: "forged".to_owned(),
            }),
        )
        .await;

        let Ok(response) = response else {
            panic!("rejected token should produce a signed-out response");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let context = TowerSessionContext::new(session);
        assert_eq!(context.token().await.ok().flatten(), None);
    }

    #[tokio::test]
    async fn blank_token_is_a_validation_error() {
        let state = test_state(super_admin());

        let response = adopt_session_handler(
            State(state),
            memory_session(),
            Json(AdoptSessionRequest {
                token: "   ".to_owned(),
            }),
        )
        .await;

        assert!(matches!(response, Err(error) if error.status() == StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn sign_out_clears_the_stored_token() {
        let state = test_state(super_admin());
        let session = memory_session();
        let context = TowerSessionContext::new(session.clone());
        assert!(context.store_token(VALID_TOKEN).await.is_ok());

        let response = sign_out_handler(State(state), session).await;

        let Ok(Json(body)) = response else {
            panic!("sign-out should succeed");
        };
        assert_eq!(body.redirect_to, "http://localhost:3000/sign-in");
        assert_eq!(context.token().await.ok().flatten(), None);
    }

    #[tokio::test]
    async fn dashboard_starts_on_overview_with_a_filtered_menu() {
        let Json(body) = dashboard_handler(Extension(sub_admin(&["events-all"]))).await;

        assert_eq!(body.active_section, "overview");
        assert_eq!(body.active_view, "overview");
        assert!(!body.session.actor.is_super_admin);
        assert!(
            body.session
                .menu
                .iter()
                .any(|entry| entry.id == "events" && entry.enabled)
        );
        assert!(
            body.session
                .menu
                .iter()
                .any(|entry| entry.id == "sub-admins" && !entry.enabled)
        );
    }
}
