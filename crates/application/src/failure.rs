use eventdesk_core::AppError;

/// Message fragment the auth service uses when it rejects a token.
pub const AUTHENTICATION_FAILED_SIGNAL: &str = "Authentication failed";

/// How a failed operation is surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Local input problem; the operator corrects the form.
    Validation,
    /// Session is gone; handled by the access gate, never shown inline.
    Authentication,
    /// Anything reported after a round-trip; shown as a dismissible message.
    Server,
}

/// Returns whether an error means the session is no longer valid.
#[must_use]
pub fn is_authentication_failure(error: &AppError) -> bool {
    match error {
        AppError::Unauthorized(_) => true,
        AppError::Validation(message)
        | AppError::NotFound(message)
        | AppError::Conflict(message)
        | AppError::Forbidden(message)
        | AppError::Internal(message) => message.contains(AUTHENTICATION_FAILED_SIGNAL),
    }
}

/// Classifies an error into the category the editing surface displays.
#[must_use]
pub fn classify_failure(error: &AppError) -> FailureKind {
    if is_authentication_failure(error) {
        return FailureKind::Authentication;
    }

    match error {
        AppError::Validation(_) => FailureKind::Validation,
        _ => FailureKind::Server,
    }
}
