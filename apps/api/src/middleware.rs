use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use eventdesk_application::{AUTHENTICATION_FAILED_SIGNAL, GateDecision, SessionContext};
use eventdesk_core::AppError;
use tower_sessions::Session;
use tracing::warn;

use crate::dto::SignedOutResponse;
use crate::error::ApiResult;
use crate::session_context::TowerSessionContext;
use crate::state::AppState;

/// How a forced sign-out is reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutStyle {
    /// `401` with a JSON body naming the sign-in URL.
    Json,
    /// `303` to the sign-in URL.
    Redirect,
}

pub async fn require_api_session(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    gate_request(state, session, request, next, SignOutStyle::Json).await
}

pub async fn require_dashboard_session(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    gate_request(state, session, request, next, SignOutStyle::Redirect).await
}

async fn gate_request(
    state: AppState,
    session: Session,
    mut request: Request,
    next: Next,
    style: SignOutStyle,
) -> ApiResult<Response> {
    let context = Arc::new(TowerSessionContext::new(session));
    let path = request.uri().path().to_owned();

    let GateDecision::Admitted(actor) = state.access_gate.admit(context.as_ref()).await? else {
        warn!(path = %path, "session rejected, signing out");
        return Ok(signed_out_response(state.sign_in_url.as_str(), style));
    };

    let subject = actor.subject().to_owned();
    request.extensions_mut().insert(actor);
    request.extensions_mut().insert(context.clone());
    let response = next.run(request).await;

    if response.status() == StatusCode::UNAUTHORIZED && !context.is_redirected() {
        state.access_gate.force_sign_out(context.as_ref()).await?;
    }

    if context.is_redirected() {
        warn!(
            path = %path,
            subject = %subject,
            redirects = context.redirect_count(),
            "authentication failed mid-request, signing out"
        );
        return Ok(signed_out_response(state.sign_in_url.as_str(), style));
    }

    Ok(response)
}

pub fn signed_out_response(sign_in_url: &str, style: SignOutStyle) -> Response {
    match style {
        SignOutStyle::Json => (
            StatusCode::UNAUTHORIZED,
            Json(SignedOutResponse {
                message: format!("{AUTHENTICATION_FAILED_SIGNAL}: please sign in again"),
                redirect_to: sign_in_url.to_owned(),
            }),
        )
            .into_response(),
        SignOutStyle::Redirect => Redirect::to(sign_in_url).into_response(),
    }
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Forbidden("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.frontend_url.as_str();
        if origin != allowed_origin && !referer.starts_with(allowed_origin) {
            return Err(AppError::Forbidden("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
