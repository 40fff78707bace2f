use hostel_platform_shared::BookingStatus;
use std::collections::BTreeMap;

/// Field-keyed validation errors, raised locally before any network call.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local validation failed; the action is blocked and nothing is sent to
    /// the backend.
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// Network-level failure (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP response, with a message extracted from the body when the
    /// backend provided one.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Attempted status change on a booking that is already terminal. Kept
    /// distinct from transport failures so callers can report "already
    /// processed" instead of "network failed".
    #[error("Cannot {action} a booking that is already {from}")]
    InvalidTransition {
        from: BookingStatus,
        action: &'static str,
    },

    /// Duplicate in-flight action, or a billing run already in progress for
    /// the same (month, year).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation error shorthand.
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        AppError::Validation(errors)
    }
}
