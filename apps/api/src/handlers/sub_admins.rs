use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use eventdesk_application::SubAdminEditor;
use eventdesk_core::ActorIdentity;
use eventdesk_domain::{DeleteConfirmation, SelectionDraft, SubAdminId};
use tracing::info;

use crate::dto::{
    CreateSubAdminRequest, DeleteSubAdminQuery, SubAdminDetailResponse, SubAdminResponse,
    UpdateSubAdminRequest,
};
use crate::error::ApiResult;
use crate::session_context::TowerSessionContext;
use crate::state::AppState;

pub async fn list_sub_admins_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(context): Extension<Arc<TowerSessionContext>>,
) -> ApiResult<Json<Vec<SubAdminResponse>>> {
    let result = state.sub_admin_service.list(&actor).await;
    let accounts = state
        .access_gate
        .intercept(context.as_ref(), result)
        .await?
        .into_iter()
        .map(SubAdminResponse::from)
        .collect();

    Ok(Json(accounts))
}

pub async fn get_sub_admin_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(context): Extension<Arc<TowerSessionContext>>,
    Path(sub_admin_id): Path<String>,
) -> ApiResult<Json<SubAdminDetailResponse>> {
    let id = sub_admin_id.parse::<SubAdminId>()?;
    let result = state.sub_admin_service.get(&actor, id).await;
    let account = state.access_gate.intercept(context.as_ref(), result).await?;

    Ok(Json(SubAdminDetailResponse::from(account)))
}

pub async fn create_sub_admin_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(context): Extension<Arc<TowerSessionContext>>,
    Json(payload): Json<CreateSubAdminRequest>,
) -> ApiResult<(StatusCode, Json<SubAdminResponse>)> {
    let mut editor = SubAdminEditor::for_create();
    payload.apply_to(editor.form_mut())?;
    *editor.draft_mut() = SelectionDraft::from_permissions(payload.permissions.iter().cloned());

    let account = editor
        .submit(
            &state.sub_admin_service,
            &actor,
            &state.access_gate,
            context.as_ref(),
        )
        .await?;

    info!(
        subject = %actor.subject(),
        sub_admin_id = %account.id,
        "sub-admin created"
    );

    Ok((StatusCode::CREATED, Json(SubAdminResponse::from(account))))
}

/// Loads the stored account into an edit-mode editor, applies the payload,
/// and submits.
pub async fn update_sub_admin_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(context): Extension<Arc<TowerSessionContext>>,
    Path(sub_admin_id): Path<String>,
    Json(payload): Json<UpdateSubAdminRequest>,
) -> ApiResult<Json<SubAdminResponse>> {
    let id = sub_admin_id.parse::<SubAdminId>()?;
    let result = state.sub_admin_service.get(&actor, id).await;
    let existing = state.access_gate.intercept(context.as_ref(), result).await?;

    let mut editor = SubAdminEditor::for_edit(&existing);
    payload.apply_to(editor.form_mut())?;
    *editor.draft_mut() = SelectionDraft::from_permissions(payload.permissions.iter().cloned());

    let account = editor
        .submit(
            &state.sub_admin_service,
            &actor,
            &state.access_gate,
            context.as_ref(),
        )
        .await?;

    info!(
        subject = %actor.subject(),
        sub_admin_id = %account.id,
        "sub-admin updated"
    );

    Ok(Json(SubAdminResponse::from(account)))
}

pub async fn delete_sub_admin_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    Extension(context): Extension<Arc<TowerSessionContext>>,
    Path(sub_admin_id): Path<String>,
    Query(query): Query<DeleteSubAdminQuery>,
) -> ApiResult<StatusCode> {
    let id = sub_admin_id.parse::<SubAdminId>()?;
    let confirmation = DeleteConfirmation::from_flag(query.confirm.unwrap_or(false));
    let result = state
        .sub_admin_service
        .delete(&actor, id, confirmation)
        .await;
    state.access_gate.intercept(context.as_ref(), result).await?;

    info!(subject = %actor.subject(), sub_admin_id = %id, "sub-admin deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests;
