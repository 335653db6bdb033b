//! Error types for the Renpho API client.
//!
//! This module contains the configuration error type and the unified
//! [`RenphoError`] returned by every [`SessionClient`](crate::SessionClient)
//! operation.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Remote operations return `Result<T, RenphoError>`,
//! where each variant maps to one failure family:
//!
//! - [`RenphoError::Crypto`]: the password could not be encrypted
//! - [`RenphoError::Authentication`]: the sign-in exchange failed
//! - [`RenphoError::Transport`]: the HTTP layer failed
//! - [`RenphoError::Api`]: the vendor reported a business error
//!
//! # Example
//!
//! ```rust
//! use renpho_api::{ConfigError, Email};
//!
//! let result = Email::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidEmail { .. })));
//! ```

use thiserror::Error;

use crate::auth::{AuthenticationError, CryptoError};
use crate::clients::{ApiError, TransportError};

/// Errors that can occur while building the client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Email address is empty or malformed.
    #[error("Invalid email '{email}'. Please provide the address used to sign in to the Renpho app.")]
    InvalidEmail {
        /// The invalid email that was provided.
        email: String,
    },

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the Renpho account password.")]
    EmptyPassword,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://renpho.qnclouds.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Weight unit is not recognised.
    #[error("Invalid weight unit '{unit}'. Expected 'kg' or 'lbs'.")]
    InvalidWeightUnit {
        /// The unit string that was provided.
        unit: String,
    },

    /// Refresh interval must be positive.
    #[error("Refresh interval must be greater than zero seconds.")]
    InvalidRefreshInterval,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Unified error type for remote operations.
///
/// Per-resource methods only return this for "hard" failures; a response
/// that simply lacks the expected field is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RenphoError {
    /// Password encryption failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Sign-in failed or was rejected.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Network or HTTP-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The vendor reported a server or account error.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RenphoError {
    /// Returns `true` if retrying later may succeed.
    ///
    /// Transport failures and transient server errors are retryable;
    /// rejected credentials and encryption failures are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Crypto(_) | Self::Api(_) => false,
            Self::Transport(_) => true,
            Self::Authentication(e) => e.reason() == crate::auth::AuthFailureReason::TransientServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthFailureReason;

    #[test]
    fn test_invalid_email_error_message() {
        let error = ConfigError::InvalidEmail {
            email: "not-an-email".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not-an-email"));
        assert!(message.contains("Renpho app"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "email" };
        let message = error.to_string();
        assert!(message.contains("email"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_api_error_is_not_transient() {
        let error = RenphoError::from(ApiError {
            status_code: "50000".to_string(),
            message: "server error".to_string(),
        });
        assert!(!error.is_transient());
        assert!(error.to_string().contains("server error"));
    }

    #[test]
    fn test_authentication_error_transience_follows_reason() {
        let rejected = RenphoError::from(AuthenticationError::Rejected {
            reason: AuthFailureReason::InvalidCredentials,
            status_code: "50000".to_string(),
            message: "password error".to_string(),
        });
        assert!(!rejected.is_transient());

        let transport = RenphoError::from(AuthenticationError::Transport {
            message: "connection reset".to_string(),
        });
        assert!(transport.is_transient());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyPassword;
        let _: &dyn std::error::Error = &error;
    }
}
