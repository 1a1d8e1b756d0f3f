//! Application services and ports.

#![forbid(unsafe_code)]

mod access_gate;
mod authorization;
mod failure;
mod session_ports;
mod sub_admin_editor;
mod sub_admin_ports;
mod sub_admin_service;

pub use access_gate::{AccessGate, GateDecision};
pub use authorization::{require_permission, require_view};
pub use failure::{
    AUTHENTICATION_FAILED_SIGNAL, FailureKind, classify_failure, is_authentication_failure,
};
pub use session_ports::{SessionContext, SessionVerifier};
pub use sub_admin_editor::{
    EditorError, EditorMode, EditorOutcome, EditorPhase, SubAdminEditor, SubAdminForm,
};
pub use sub_admin_ports::{AuditEvent, AuditRepository, PasswordHasher, SubAdminRepository};
pub use sub_admin_service::{
    SUB_ADMIN_CREATE_PERMISSION, SUB_ADMIN_DELETE_PERMISSION, SUB_ADMIN_EDIT_PERMISSION,
    SUB_ADMIN_LIST_PERMISSION, SubAdminService,
};
