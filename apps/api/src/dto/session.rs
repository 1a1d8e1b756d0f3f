use eventdesk_core::ActorIdentity;
use eventdesk_domain::menu_for;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::navigation::MenuEntryResponse;

/// Incoming payload carrying a bearer token issued by the auth service.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/adopt-session-request.ts"
)]
pub struct AdoptSessionRequest {
    pub token: String,
}

/// API representation of the signed-in actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/actor-response.ts"
)]
pub struct ActorResponse {
    pub subject: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: String,
    pub is_super_admin: bool,
    pub permissions: Vec<String>,
}

/// Signed-in actor plus the sidebar projected for them.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-response.ts"
)]
pub struct SessionResponse {
    pub actor: ActorResponse,
    pub menu: Vec<MenuEntryResponse>,
}

/// Initial state for the dashboard shell.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dashboard-bootstrap-response.ts"
)]
pub struct DashboardBootstrapResponse {
    pub session: SessionResponse,
    pub active_section: String,
    pub active_view: String,
}

impl From<&ActorIdentity> for ActorResponse {
    fn from(value: &ActorIdentity) -> Self {
        Self {
            subject: value.subject().to_owned(),
            display_name: value.display_name().to_owned(),
            email: value.email().map(str::to_owned),
            role: value.role().as_str().to_owned(),
            is_super_admin: value.is_super_admin(),
            permissions: value.permissions().iter().cloned().collect(),
        }
    }
}

impl From<&ActorIdentity> for SessionResponse {
    fn from(value: &ActorIdentity) -> Self {
        Self {
            actor: ActorResponse::from(value),
            menu: menu_for(value)
                .into_iter()
                .map(MenuEntryResponse::from)
                .collect(),
        }
    }
}
