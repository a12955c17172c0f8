//! # Error Handling
//!
//! This module defines the error taxonomy for the client. Every ceremony step
//! returns `AppResult<T>`, and the controller turns whatever went wrong into a
//! single human-readable message on the ceremony state.
//!
//! ## Categories
//! - **Validation**: a precondition was not met (never touches the network)
//! - **Network**: the transport failed or the response could not be read
//! - **Protocol**: a 2xx response broke the server contract (missing fields)
//! - **Ceremony**: the authenticator failed or the user cancelled
//! - **ServerRejection**: the server refused the finish step
//!
//! The remaining variants cover the local store and configuration.

use thiserror::Error;

/// Client-wide error type
///
/// The `#[from]` attributes let the `?` operator convert library errors
/// (SQLx, serde_json, I/O) and the nested taxonomies into `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// A ceremony precondition was not met
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transport failure, non-2xx start response, or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered 2xx but the body does not honour the contract
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The authenticator reported a failure (cancellation, timeout, hardware)
    ///
    /// The message already carries the "WebAuthn ceremony failed" prefix.
    #[error("{0}")]
    Ceremony(String),

    /// The server rejected the finish request
    #[error("{0}")]
    ServerRejection(String),

    /// Local SQLite store errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration errors for the local store
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// JSON serialization/deserialization errors outside the wire boundary
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem errors (identity catalog)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preconditions checked before any network traffic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No identity selected")]
    NoIdentitySelected,

    #[error("Unknown identity '{0}'")]
    UnknownIdentity(String),
}

/// Server contract violations detected at the deserialization boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A required field is absent, null or empty
    #[error("Missing key: {0}")]
    MissingField(&'static str),

    /// A field is present but its content cannot be decoded
    #[error("Malformed field {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// The body is JSON but not shaped like the expected response
    #[error("Unexpected response shape: {0}")]
    MalformedBody(String),
}

impl AppError {
    /// The message surfaced to the user for a failed ceremony step
    ///
    /// Ceremony and rejection errors carry their message verbatim so the
    /// server's or authenticator's wording reaches the user untouched.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Ceremony(message) | AppError::ServerRejection(message) => message.clone(),
            AppError::Validation(e) => e.to_string(),
            AppError::Protocol(e) => e.to_string(),
            AppError::Network(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
