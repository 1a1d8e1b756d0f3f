//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod navigation;
mod selection;
mod sub_admin;
mod taxonomy;

pub use audit::AuditAction;
pub use navigation::{
    DASHBOARD_MENU, DashboardView, MenuEntry, MenuSection, MenuSubEntry, MenuSubSection,
    NavigationState, OVERVIEW_SECTION_ID, can_access_view, menu_for, resolve_view,
};
pub use selection::{CategorySelection, SelectionDraft};
pub use sub_admin::{
    CreateSubAdminInput, DeleteConfirmation, EmailAddress, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, SubAdminAccount, SubAdminFields, SubAdminId, SubAdminRole,
    UpdateSubAdminInput,
};
pub use taxonomy::{
    PERMISSION_TAXONOMY, PermissionCategory, PermissionGroup, PermissionLeaf, PermissionTaxonomy,
};
