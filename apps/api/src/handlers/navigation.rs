use axum::Json;
use axum::extract::{Extension, Query};
use eventdesk_application::require_view;
use eventdesk_core::ActorIdentity;
use eventdesk_domain::resolve_view;

use crate::dto::{ResolveViewQuery, ResolvedViewResponse};
use crate::error::ApiResult;

/// Resolves a sidebar selection to its content view, refusing views the
/// actor may not open.
pub async fn resolve_view_handler(
    Extension(actor): Extension<ActorIdentity>,
    Query(query): Query<ResolveViewQuery>,
) -> ApiResult<Json<ResolvedViewResponse>> {
    let view = resolve_view(query.section.as_str(), query.sub_section.as_deref());
    require_view(&actor, view)?;

    Ok(Json(ResolvedViewResponse::new(
        query.section,
        query.sub_section,
        view,
    )))
}
