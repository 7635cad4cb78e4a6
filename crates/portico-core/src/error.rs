//! Error types for the Portico application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for login input, checked in order.
///
/// The first failing rule wins; callers never see more than one variant
/// for a given input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// One or more of the four login fields was empty.
    #[error("All fields are required")]
    MissingFields,

    /// Username shorter than 3 characters.
    #[error("Invalid username format")]
    InvalidUsername,

    /// Password shorter than 6 characters.
    #[error("Password must be at least 6 characters")]
    WeakPassword,

    /// Account ID is not exactly 12 decimal digits.
    #[error("Account ID must be 12 digits")]
    InvalidAccountId,
}

/// A shared error type for the entire Portico application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum PorticoError {
    /// Login input failed a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The portal rejected the credential exchange upstream.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// An operation requiring a valid session token was attempted without one.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A model invocation failed in the backend.
    #[error("Model invocation failed: {0}")]
    Invocation(String),

    /// A settings value fell outside its permitted range.
    #[error("Setting '{field}' out of range: {value}")]
    SettingsOutOfRange { field: &'static str, value: f64 },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PorticoError {
    /// Creates an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates an Invocation error
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Returns the validation kind if this error carries one.
    pub fn validation_kind(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PorticoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PorticoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PorticoError>`.
pub type Result<T> = std::result::Result<T, PorticoError>;
