use eventdesk_domain::{
    CategorySelection, PERMISSION_TAXONOMY, PermissionCategory, PermissionGroup, PermissionLeaf,
    SelectionDraft,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of one grantable leaf permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-leaf-response.ts"
)]
pub struct PermissionLeafResponse {
    pub id: String,
    pub title: String,
}

/// API representation of a permission category and its leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-category-response.ts"
)]
pub struct PermissionCategoryResponse {
    pub id: String,
    pub title: String,
    pub leaves: Vec<PermissionLeafResponse>,
}

/// Granted leaves of one category, used by the read-only account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub category_id: String,
    pub category_title: String,
    pub leaves: Vec<PermissionLeafResponse>,
}

/// Permission selection draft as exchanged with the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/selection-draft-payload.ts"
)]
pub struct SelectionDraftPayload {
    #[serde(default)]
    pub selected_leaf_ids: Vec<String>,
    #[serde(default)]
    pub expanded_category_ids: Vec<String>,
}

/// One editor interaction applied to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/selection-action.ts"
)]
pub enum SelectionAction {
    ToggleLeaf(String),
    ToggleCategory(String),
    ToggleExpanded(String),
}

/// Incoming payload for applying a selection action.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/apply-selection-request.ts"
)]
pub struct ApplySelectionRequest {
    #[serde(default)]
    pub draft: SelectionDraftPayload,
    pub action: SelectionAction,
}

/// Rendering state of one category checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-selection-response.ts"
)]
pub struct CategorySelectionResponse {
    pub id: String,
    pub state: String,
    pub expanded: bool,
}

/// Draft after an action, with per-category checkbox state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/selection-state-response.ts"
)]
pub struct SelectionStateResponse {
    pub draft: SelectionDraftPayload,
    pub categories: Vec<CategorySelectionResponse>,
}

impl From<&PermissionLeaf> for PermissionLeafResponse {
    fn from(value: &PermissionLeaf) -> Self {
        Self {
            id: value.id().to_owned(),
            title: value.title().to_owned(),
        }
    }
}

impl From<&PermissionCategory> for PermissionCategoryResponse {
    fn from(value: &PermissionCategory) -> Self {
        Self {
            id: value.id().to_owned(),
            title: value.title().to_owned(),
            leaves: value.leaves().iter().map(PermissionLeafResponse::from).collect(),
        }
    }
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(value: PermissionGroup) -> Self {
        Self {
            category_id: value.category.id().to_owned(),
            category_title: value.category.title().to_owned(),
            leaves: value
                .leaves
                .into_iter()
                .map(PermissionLeafResponse::from)
                .collect(),
        }
    }
}

impl From<SelectionDraftPayload> for SelectionDraft {
    fn from(value: SelectionDraftPayload) -> Self {
        let mut draft = SelectionDraft::from_permissions(value.selected_leaf_ids);
        for category_id in &value.expanded_category_ids {
            if !draft.is_expanded(category_id) {
                draft.toggle_expanded(category_id);
            }
        }
        draft
    }
}

impl From<&SelectionDraft> for SelectionDraftPayload {
    fn from(value: &SelectionDraft) -> Self {
        Self {
            selected_leaf_ids: value.flatten(),
            expanded_category_ids: value.expanded_category_ids().iter().cloned().collect(),
        }
    }
}

impl From<&SelectionDraft> for SelectionStateResponse {
    fn from(value: &SelectionDraft) -> Self {
        let categories = PERMISSION_TAXONOMY
            .categories()
            .iter()
            .map(|category| CategorySelectionResponse {
                id: category.id().to_owned(),
                state: category_state_label(value.category_state(category.id())).to_owned(),
                expanded: value.is_expanded(category.id()),
            })
            .collect();

        Self {
            draft: SelectionDraftPayload::from(value),
            categories,
        }
    }
}

fn category_state_label(state: CategorySelection) -> &'static str {
    match state {
        CategorySelection::Unchecked => "unchecked",
        CategorySelection::Partial => "partial",
        CategorySelection::Checked => "checked",
    }
}
