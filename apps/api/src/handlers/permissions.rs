use axum::Json;
use eventdesk_core::AppError;
use eventdesk_domain::{PERMISSION_TAXONOMY, SelectionDraft};

use crate::dto::{
    ApplySelectionRequest, PermissionCategoryResponse, SelectionAction, SelectionStateResponse,
};
use crate::error::ApiResult;

pub async fn permission_taxonomy_handler() -> Json<Vec<PermissionCategoryResponse>> {
    Json(
        PERMISSION_TAXONOMY
            .categories()
            .iter()
            .map(PermissionCategoryResponse::from)
            .collect(),
    )
}

/// Applies one checkbox or expander interaction to a selection draft.
pub async fn apply_selection_handler(
    Json(payload): Json<ApplySelectionRequest>,
) -> ApiResult<Json<SelectionStateResponse>> {
    let mut draft = SelectionDraft::from(payload.draft);

    match &payload.action {
        SelectionAction::ToggleLeaf(leaf_id) => {
            if !PERMISSION_TAXONOMY.contains_leaf(leaf_id) {
                return Err(
                    AppError::Validation(format!("unknown permission '{leaf_id}'")).into(),
                );
            }
            draft.toggle_leaf(leaf_id);
        }
        SelectionAction::ToggleCategory(category_id)
        | SelectionAction::ToggleExpanded(category_id) => {
            if PERMISSION_TAXONOMY.find_category(category_id).is_none() {
                return Err(AppError::Validation(format!(
                    "unknown permission category '{category_id}'"
                ))
                .into());
            }

            if matches!(payload.action, SelectionAction::ToggleCategory(_)) {
                draft.toggle_category(category_id);
            } else {
                draft.toggle_expanded(category_id);
            }
        }
    }

    Ok(Json(SelectionStateResponse::from(&draft)))
}
