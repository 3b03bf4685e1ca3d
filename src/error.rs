//! Error types for the dashboard core.
//!
//! The taxonomy is deliberately small: settings I/O degrades silently at the
//! call site, export failures are surfaced to the caller, and everything else
//! is pure in-memory state manipulation with no fatal paths.

use thiserror::Error;

use crate::types::ExportFormat;

#[derive(Debug, Error)]
pub enum SalonError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Export to {0} is not available in this build")]
    ExportUnsupported(ExportFormat),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    #[error("Internal error: lock poisoned")]
    LockPoisoned,
}

impl SalonError {
    /// Can the user retry the same action and expect it to work?
    pub fn can_retry(&self) -> bool {
        matches!(self, SalonError::ExportFailed(_) | SalonError::LockPoisoned)
    }
}

/// Serializable error representation for IPC. Every command returns this as
/// its error type so the frontend gets the message and the retry hint.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiError {
    pub message: String,
    pub can_retry: bool,
}

impl UiError {
    pub fn new(message: impl Into<String>) -> Self {
        UiError {
            message: message.into(),
            can_retry: false,
        }
    }
}

impl From<SalonError> for UiError {
    fn from(err: SalonError) -> Self {
        UiError {
            message: err.to_string(),
            can_retry: err.can_retry(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_unsupported_message_names_format() {
        let err = SalonError::ExportUnsupported(ExportFormat::Xlsx);
        assert!(err.to_string().contains("xlsx"));
        assert!(!err.can_retry());
    }

    #[test]
    fn test_ui_error_carries_retry_flag() {
        let err = SalonError::ExportFailed("disk full".to_string());
        let ui = UiError::from(err);
        assert!(ui.can_retry);
        assert!(ui.message.contains("disk full"));
    }

    #[test]
    fn test_lock_poisoned_maps_to_retryable_ui_error() {
        let ui = UiError::from(SalonError::LockPoisoned);
        assert!(ui.can_retry);
        assert!(ui.message.contains("lock poisoned"));
    }
}
