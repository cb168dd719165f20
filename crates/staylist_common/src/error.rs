// --- File: crates/staylist_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Staylist errors.
///
/// Each crate can extend this by implementing From<SpecificError> for StaylistError.
#[derive(Error, Debug)]
pub enum StaylistError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The remote store rejected the credentials or the write
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Errors reported by a [`crate::services::ListingStore`].
///
/// The variants follow what a caller can do about them: network failures are
/// worth a retry or reload, permission failures are not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The remote call failed entirely (connection, timeout, 5xx)
    #[error("Network error: {0}")]
    Network(String),

    /// The remote authorization layer rejected the request
    #[error("Permission denied: {0}")]
    Permission(String),

    /// The requested listing does not exist on the remote store
    #[error("Listing not found: {0}")]
    NotFound(String),

    /// The remote answered with a body we could not understand
    #[error("Failed to parse store response: {0}")]
    Parse(String),

    /// Any other non-success answer
    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl StoreError {
    /// Classifies a non-success HTTP status returned by the remote store.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => StoreError::Permission(message),
            404 => StoreError::NotFound(message),
            408 | 500..=599 => StoreError::Network(format!("status {}: {}", status, message)),
            _ => StoreError::Api { status, message },
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for StaylistError {
    fn status_code(&self) -> u16 {
        match self {
            StaylistError::HttpError(_) => 500,
            StaylistError::ParseError(_) => 400,
            StaylistError::ConfigError(_) => 500,
            StaylistError::AuthError(_) => 403,
            StaylistError::ValidationError(_) => 400,
            StaylistError::ExternalServiceError { .. } => 502,
            StaylistError::NotFoundError(_) => 404,
            StaylistError::InternalError(_) => 500,
        }
    }
}

impl HttpStatusCode for StoreError {
    fn status_code(&self) -> u16 {
        match self {
            StoreError::Network(_) => 502,
            StoreError::Permission(_) => 403,
            StoreError::NotFound(_) => 404,
            StoreError::Parse(_) => 502,
            StoreError::Api { .. } => 502,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, StaylistError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, StaylistError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| StaylistError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for StaylistError {
    fn from(err: reqwest::Error) -> Self {
        StaylistError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for StaylistError {
    fn from(err: serde_json::Error) -> Self {
        StaylistError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return StoreError::Parse(err.to_string());
        }
        match err.status() {
            Some(status) => StoreError::from_status(status.as_u16(), err.to_string()),
            None => StoreError::Network(err.to_string()),
        }
    }
}

impl From<StoreError> for StaylistError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Permission(message) => StaylistError::AuthError(message),
            StoreError::NotFound(message) => StaylistError::NotFoundError(message),
            other => StaylistError::ExternalServiceError {
                service_name: "listing store".to_string(),
                message: other.to_string(),
            },
        }
    }
}
