use eventdesk_core::{ActorIdentity, AppError, AppResult};
use eventdesk_domain::{DashboardView, can_access_view};

/// Ensures the actor holds a leaf permission.
///
/// Inactive actors are rejected as unauthenticated so the access gate signs
/// them out; a missing grant is a plain authorization denial.
pub fn require_permission(actor: &ActorIdentity, leaf_id: &str) -> AppResult<()> {
    if !actor.is_active() {
        return Err(AppError::Unauthorized(format!(
            "account '{}' is inactive",
            actor.subject()
        )));
    }

    if actor.holds(leaf_id) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "subject '{}' is missing permission '{leaf_id}'",
        actor.subject()
    )))
}

/// Ensures the actor may render a dashboard view.
pub fn require_view(actor: &ActorIdentity, view: DashboardView) -> AppResult<()> {
    if can_access_view(actor, view) {
        return Ok(());
    }

    match view.required_permission() {
        Some(leaf_id) => require_permission(actor, leaf_id),
        None => Err(AppError::Unauthorized(format!(
            "account '{}' is inactive",
            actor.subject()
        ))),
    }
}
