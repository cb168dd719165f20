// --- File: crates/staylist_calendar/src/error.rs ---
use staylist_common::{ListingId, StaylistError, StoreError};
use thiserror::Error;

/// Errors of the availability calendar.
///
/// Everything here is non-fatal: the reconciler turns these into user-visible
/// notices and the drag controller never sees them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The remote call failed entirely
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The remote authorization layer rejected the write
    #[error("Permission denied: {0}")]
    PermissionError(String),

    /// The write went through but the reload that should confirm it failed
    #[error("Saved, but the change could not be verified: {0}")]
    VerificationFailure(String),

    /// A selection that resolved to zero dates
    #[error("Selection contains no dates")]
    NoOpSelection,

    #[error("Unknown listing: {0}")]
    UnknownListing(ListingId),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl CalendarError {
    /// Short text suitable for an inline error message.
    pub fn user_message(&self) -> String {
        match self {
            CalendarError::NetworkError(_) => {
                "Could not reach the listing service. The calendar has been reloaded.".to_string()
            }
            CalendarError::PermissionError(_) => {
                "You are not allowed to change this listing. Please sign in again.".to_string()
            }
            CalendarError::VerificationFailure(_) => {
                "Saved, but the calendar could not be refreshed. Showing the local change."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for CalendarError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Permission(message) => CalendarError::PermissionError(message),
            other => CalendarError::NetworkError(other.to_string()),
        }
    }
}

impl From<CalendarError> for StaylistError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::NetworkError(message) => StaylistError::ExternalServiceError {
                service_name: "listing store".to_string(),
                message,
            },
            CalendarError::PermissionError(message) => StaylistError::AuthError(message),
            CalendarError::VerificationFailure(message) => StaylistError::ExternalServiceError {
                service_name: "listing store".to_string(),
                message,
            },
            CalendarError::UnknownListing(id) => {
                StaylistError::NotFoundError(format!("listing {}", id))
            }
            other => StaylistError::ValidationError(other.to_string()),
        }
    }
}
