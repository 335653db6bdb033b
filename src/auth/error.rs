//! Authentication error types.
//!
//! # Error Types
//!
//! - [`AuthenticationError::Rejected`]: the vendor refused the sign-in
//! - [`AuthenticationError::MalformedResponse`]: the sign-in response had no session key
//! - [`AuthenticationError::Transport`]: the sign-in request never got a usable answer
//!
//! Every variant is `Clone` because one in-flight sign-in outcome is handed
//! to every caller that was waiting on it. A password that cannot be
//! encrypted is a [`CryptoError`](crate::auth::CryptoError), not a sign-in
//! failure.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a failed sign-in, for user-facing flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthFailureReason {
    /// Wrong email/password combination.
    InvalidCredentials,
    /// The email is not registered with the vendor.
    UnregisteredAccount,
    /// Network, server, or protocol trouble; retrying later may succeed.
    TransientServerError,
}

impl AuthFailureReason {
    /// Classifies a rejected sign-in from the vendor status code and message.
    ///
    /// The vendor reports both bad passwords and unknown accounts with the
    /// same status code, so the message text decides between them.
    #[must_use]
    pub fn classify(status_code: &str, message: &str) -> Self {
        let message = message.to_ascii_lowercase();
        let unregistered = ["not registered", "unregistered", "not exist", "no such user", "not found"];
        let bad_credentials = ["password", "credential", "incorrect", "invalid", "wrong"];

        if unregistered.iter().any(|needle| message.contains(needle)) {
            Self::UnregisteredAccount
        } else if bad_credentials.iter().any(|needle| message.contains(needle)) {
            Self::InvalidCredentials
        } else if status_code.starts_with('4') {
            Self::InvalidCredentials
        } else {
            Self::TransientServerError
        }
    }
}

impl fmt::Display for AuthFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => f.write_str("invalid credentials"),
            Self::UnregisteredAccount => f.write_str("unregistered account"),
            Self::TransientServerError => f.write_str("transient server error"),
        }
    }
}

/// Errors that can occur while signing in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The vendor rejected the sign-in.
    #[error("Sign-in rejected ({reason}) with status {status_code}: {message}")]
    Rejected {
        /// Classified reason.
        reason: AuthFailureReason,
        /// Vendor status code, e.g. `"50000"`.
        status_code: String,
        /// Vendor status message.
        message: String,
    },

    /// The sign-in response could not be used.
    #[error("Malformed sign-in response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// The sign-in request failed at the HTTP layer.
    #[error("Sign-in request failed: {message}")]
    Transport {
        /// Transport error detail.
        message: String,
    },
}

impl AuthenticationError {
    /// Returns the classified reason for this failure.
    #[must_use]
    pub const fn reason(&self) -> AuthFailureReason {
        match self {
            Self::Rejected { reason, .. } => *reason,
            Self::MalformedResponse { .. } | Self::Transport { .. } => {
                AuthFailureReason::TransientServerError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unregistered_account() {
        assert_eq!(
            AuthFailureReason::classify("50000", "Email is not registered"),
            AuthFailureReason::UnregisteredAccount
        );
    }

    #[test]
    fn test_classify_bad_password() {
        assert_eq!(
            AuthFailureReason::classify("50000", "Password error"),
            AuthFailureReason::InvalidCredentials
        );
        assert_eq!(
            AuthFailureReason::classify("40100", ""),
            AuthFailureReason::InvalidCredentials
        );
    }

    #[test]
    fn test_classify_falls_back_to_transient() {
        assert_eq!(
            AuthFailureReason::classify("50000", "internal server error"),
            AuthFailureReason::TransientServerError
        );
    }

    #[test]
    fn test_rejected_message_includes_reason_and_status() {
        let error = AuthenticationError::Rejected {
            reason: AuthFailureReason::UnregisteredAccount,
            status_code: "50000".to_string(),
            message: "Email not exist".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("unregistered account"));
        assert!(message.contains("50000"));
        assert!(message.contains("Email not exist"));
        assert_eq!(error.reason(), AuthFailureReason::UnregisteredAccount);
    }

    #[test]
    fn test_transport_failure_is_transient() {
        let error = AuthenticationError::Transport {
            message: "timed out".to_string(),
        };
        assert_eq!(error.reason(), AuthFailureReason::TransientServerError);
    }

    #[test]
    fn test_auth_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthenticationError>();
    }
}
