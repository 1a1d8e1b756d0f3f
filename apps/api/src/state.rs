use eventdesk_application::{AccessGate, SubAdminService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sub_admin_service: SubAdminService,
    pub access_gate: AccessGate,
    pub frontend_url: String,
    pub sign_in_url: String,
}
