//! Authentication types for the Renpho API client.
//!
//! # Overview
//!
//! - [`Credentials`]: email and password for one account
//! - [`Session`]: the session key obtained by signing in
//! - [`AuthState`]: the client's authentication lifecycle
//! - [`encrypt_password`]: RSA/PKCS#1 v1.5 password encryption for sign-in
//! - [`AuthenticationError`] and [`CryptoError`]: sign-in failures
//!
//! # Sign-in Flow
//!
//! The vendor never sees the plaintext password. Each sign-in encrypts the
//! password with the vendor's RSA public key, base64-encodes the result and
//! posts `{secure_flag, email, password}`. A successful response carries the
//! `terminal_user_session_key` that authorizes every later request.
//!
//! The [`SessionClient`](crate::SessionClient) runs this flow on demand; use
//! it rather than calling the sign-in endpoint directly.

mod cipher;
mod error;
pub mod session;

pub use cipher::{encrypt_password, parse_public_key, CryptoError};
pub use error::{AuthFailureReason, AuthenticationError};
pub use session::{AuthState, Credentials, Session};
