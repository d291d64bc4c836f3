//! Error types for the SNS integration module.
//!
//! Every failure an operation can produce is folded into [`SnsError`]. Service
//! failures share a single [`SnsError::General`] variant carrying the raw error
//! body, while signing and transport failures are passed through with their
//! own payload.

mod classify;

pub use classify::classify;

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the SNS integration.
#[derive(Debug, Error)]
pub enum SnsError {
    /// The service answered with a failure status (or no status at all).
    ///
    /// `reason` holds the response body verbatim when it was valid UTF-8.
    #[error("SNS error: {}", reason.as_deref().unwrap_or("no reason given"))]
    General {
        /// Raw error body returned by the service.
        reason: Option<String>,
    },

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// AWS signing errors.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Network and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// A structured message could not be serialized to JSON text.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Details about the serialization failure.
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        /// The API action whose response failed to decode.
        operation: String,
        /// Details about the decode failure.
        message: String,
    },
}

impl SnsError {
    /// Build a service error with an optional reason.
    pub fn general(reason: Option<String>) -> Self {
        SnsError::General { reason }
    }

    /// Returns the service-provided reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SnsError::General { reason } => reason.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the service rejected the request.
    pub fn is_service_error(&self) -> bool {
        matches!(self, SnsError::General { .. })
    }

    /// Returns true if the service accepted the request but the response
    /// body could not be decoded.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, SnsError::Decode { .. })
    }

    /// Returns true if the request never left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SnsError::Configuration(_) | SnsError::Signing(_) | SnsError::Serialization { .. }
        )
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing required credentials.
    #[error("Missing credentials: credentials must be specified via config or environment")]
    MissingCredentials,

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL '{url}': {details}")]
    InvalidEndpoint {
        /// The invalid URL.
        url: String,
        /// Details about the validation error.
        details: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// AWS Signature V4 signing errors.
#[derive(Debug, Clone, Error)]
pub enum SigningError {
    /// Credentials cannot be used for signing.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials {
        /// Details about why credentials are invalid.
        message: String,
    },

    /// The request URL cannot be signed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Details about the request problem.
        message: String,
    },
}

/// Network and transport errors.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// Connection could not be established or was dropped.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Details about the connection failure.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// The timeout that elapsed.
        duration: Duration,
    },

    /// TLS setup or handshake failure.
    #[error("TLS error: {message}")]
    TlsError {
        /// Details about the TLS error.
        message: String,
    },
}
