mod common;
mod navigation;
mod permissions;
mod session;
mod sub_admins;

pub use common::{HealthResponse, SignedOutResponse};
pub use navigation::{MenuEntryResponse, ResolveViewQuery, ResolvedViewResponse};
pub use permissions::{
    ApplySelectionRequest, PermissionCategoryResponse, SelectionAction, SelectionDraftPayload,
    SelectionStateResponse,
};
pub use session::{AdoptSessionRequest, DashboardBootstrapResponse, SessionResponse};
pub use sub_admins::{
    CreateSubAdminRequest, DeleteSubAdminQuery, SubAdminDetailResponse, SubAdminResponse,
    UpdateSubAdminRequest,
};
