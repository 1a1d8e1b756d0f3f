use eventdesk_domain::{DashboardView, MenuEntry, MenuSubEntry};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query for resolving a sidebar selection to a content view.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolve-view-query.ts"
)]
pub struct ResolveViewQuery {
    pub section: String,
    pub sub_section: Option<String>,
}

/// Content view chosen for a sidebar selection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolved-view-response.ts"
)]
pub struct ResolvedViewResponse {
    pub section: String,
    pub sub_section: Option<String>,
    pub view: String,
    pub required_permission: Option<String>,
}

/// Sidebar sub-item as shown to the signed-in actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-sub-entry-response.ts"
)]
pub struct MenuSubEntryResponse {
    pub id: String,
    pub title: String,
    pub view: String,
    pub enabled: bool,
}

/// Sidebar section as shown to the signed-in actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/menu-entry-response.ts"
)]
pub struct MenuEntryResponse {
    pub id: String,
    pub title: String,
    pub enabled: bool,
    pub sub_sections: Vec<MenuSubEntryResponse>,
}

impl ResolvedViewResponse {
    pub fn new(section: String, sub_section: Option<String>, view: DashboardView) -> Self {
        Self {
            section,
            sub_section,
            view: view.as_str().to_owned(),
            required_permission: view.required_permission().map(str::to_owned),
        }
    }
}

impl From<MenuSubEntry> for MenuSubEntryResponse {
    fn from(value: MenuSubEntry) -> Self {
        Self {
            id: value.id.to_owned(),
            title: value.title.to_owned(),
            view: value.view.as_str().to_owned(),
            enabled: value.enabled,
        }
    }
}

impl From<MenuEntry> for MenuEntryResponse {
    fn from(value: MenuEntry) -> Self {
        Self {
            id: value.id.to_owned(),
            title: value.title.to_owned(),
            enabled: value.enabled,
            sub_sections: value
                .sub_sections
                .into_iter()
                .map(MenuSubEntryResponse::from)
                .collect(),
        }
    }
}
