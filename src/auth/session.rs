//! Credentials and session state for the vendor API.
//!
//! This module provides the [`Credentials`] used to sign in, the
//! [`Session`] obtained from a successful sign-in, and the [`AuthState`]
//! reported by [`SessionClient`](crate::SessionClient).

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::{Email, Password, UserId};

/// Account credentials, owned exclusively by one client.
///
/// Immutable once constructed. The password stays in memory only and is
/// masked in `Debug` output.
///
/// # Example
///
/// ```rust
/// use renpho_api::{Credentials, Email, Password};
///
/// let credentials = Credentials::new(
///     Email::new("someone@example.com").unwrap(),
///     Password::new("hunter2").unwrap(),
/// );
/// assert_eq!(credentials.email().as_ref(), "someone@example.com");
/// assert!(!format!("{:?}", credentials).contains("hunter2"));
/// ```
#[derive(Clone, Debug)]
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Creates a new credential pair.
    #[must_use]
    pub const fn new(email: Email, password: Password) -> Self {
        Self { email, password }
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the account password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// An authenticated session with the vendor API.
///
/// Created by a successful sign-in and discarded on logout, on a
/// session-expired response, or when the transport is torn down.
#[derive(Clone)]
pub struct Session {
    /// The opaque session key (`terminal_user_session_key`).
    pub token: String,

    /// When the session key was issued.
    pub issued_at: DateTime<Utc>,

    /// The account id returned by the sign-in, if any.
    pub user_id: Option<UserId>,
}

impl Session {
    /// Creates a session issued now.
    #[must_use]
    pub fn new(token: String, user_id: Option<UserId>) -> Self {
        Self {
            token,
            issued_at: Utc::now(),
            user_id,
        }
    }

    /// Returns `true` if the session carries a usable token.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns how long ago this session was issued.
    #[must_use]
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.issued_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"*****")
            .field("issued_at", &self.issued_at)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Authentication lifecycle of a [`SessionClient`](crate::SessionClient).
///
/// `Unauthenticated -> Authenticating -> Authenticated`, falling back to
/// `Unauthenticated` on sign-in failure, logout, transport teardown, or a
/// session-expired response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No session key is held.
    Unauthenticated,
    /// A sign-in request is in flight.
    Authenticating,
    /// A session key is held.
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Authenticating => f.write_str("authenticating"),
            Self::Authenticated => f.write_str("authenticated"),
        }
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
    assert_send_sync::<Credentials>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_active() {
        let active = Session::new("token".to_string(), None);
        assert!(active.is_active());

        let empty = Session::new(String::new(), None);
        assert!(!empty.is_active());
    }

    #[test]
    fn test_session_debug_masks_token() {
        let session = Session::new(
            "secret-session-key".to_string(),
            UserId::parse_optional("42"),
        );
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-session-key"));
        assert!(debug.contains("*****"));
        assert!(debug.contains("42"));
    }

    #[test]
    fn test_session_age_is_non_negative() {
        let session = Session::new("token".to_string(), None);
        assert!(session.age() >= chrono::Duration::zero());
    }

    #[test]
    fn test_auth_state_display() {
        assert_eq!(AuthState::Unauthenticated.to_string(), "unauthenticated");
        assert_eq!(AuthState::Authenticating.to_string(), "authenticating");
        assert_eq!(AuthState::Authenticated.to_string(), "authenticated");
    }
}
