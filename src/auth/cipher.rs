//! One-way password encryption for the sign-in exchange.
//!
//! The vendor expects the account password encrypted with its RSA public key
//! using PKCS#1 v1.5 padding and then base64-encoded. No private key is ever
//! held client-side.
//!
//! PKCS#1 v1.5 padding is randomized, so every call produces a different
//! ciphertext. Encrypt afresh for every sign-in attempt; a stored ciphertext
//! must never be replayed.
//!
//! # Example
//!
//! ```rust
//! use renpho_api::auth::encrypt_password;
//! use renpho_api::config::VENDOR_PUBLIC_KEY;
//!
//! let ciphertext = encrypt_password("hunter2", VENDOR_PUBLIC_KEY).unwrap();
//! assert!(!ciphertext.is_empty());
//! assert_ne!(ciphertext, "hunter2");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use thiserror::Error;

/// Errors raised while encrypting the sign-in password.
///
/// These are fatal: retrying with the same key and input cannot succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The plaintext password was empty.
    #[error("Cannot encrypt an empty password")]
    EmptyPlaintext,

    /// The PEM input is not an RSA public key.
    #[error("Invalid RSA public key: {message}")]
    InvalidPublicKey {
        /// Parser error detail.
        message: String,
    },

    /// The RSA operation itself failed (e.g., plaintext too long for the key).
    #[error("RSA encryption failed: {message}")]
    EncryptionFailed {
        /// Underlying error detail.
        message: String,
    },
}

/// Parses a PEM-encoded RSA public key.
///
/// Accepts both SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`) and PKCS#1
/// (`BEGIN RSA PUBLIC KEY`) encodings.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPublicKey`] if neither encoding parses.
pub fn parse_public_key(public_key_pem: &str) -> Result<RsaPublicKey, CryptoError> {
    let pem = public_key_pem.trim();
    RsaPublicKey::from_public_key_pem(pem).or_else(|spki_err| {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| CryptoError::InvalidPublicKey {
            message: spki_err.to_string(),
        })
    })
}

/// Encrypts a password with the vendor public key and base64-encodes it.
///
/// # Errors
///
/// - [`CryptoError::EmptyPlaintext`] if `password` is empty
/// - [`CryptoError::InvalidPublicKey`] if the key cannot be parsed
/// - [`CryptoError::EncryptionFailed`] if the RSA operation fails
pub fn encrypt_password(password: &str, public_key_pem: &str) -> Result<String, CryptoError> {
    if password.is_empty() {
        return Err(CryptoError::EmptyPlaintext);
    }

    let key = parse_public_key(public_key_pem)?;
    let mut rng = rand::thread_rng();
    let ciphertext = key
        .encrypt(&mut rng, Pkcs1v15Encrypt, password.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed {
            message: e.to_string(),
        })?;

    Ok(STANDARD.encode(ciphertext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VENDOR_PUBLIC_KEY;
    use rsa::pkcs8::{EncodePublicKey, LineEnding};
    use rsa::RsaPrivateKey;

    fn generate_key_pair() -> (RsaPrivateKey, String) {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        (private_key, pem)
    }

    #[test]
    fn test_round_trip_with_generated_key() {
        let (private_key, pem) = generate_key_pair();

        let encoded = encrypt_password("correct horse battery staple", &pem).unwrap();
        let ciphertext = STANDARD.decode(&encoded).unwrap();
        let plaintext = private_key.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap();

        assert_eq!(plaintext, b"correct horse battery staple");
    }

    #[test]
    fn test_vendor_key_produces_key_sized_ciphertext() {
        let encoded = encrypt_password("secret", VENDOR_PUBLIC_KEY).unwrap();
        let ciphertext = STANDARD.decode(&encoded).unwrap();

        // 1024-bit modulus
        assert_eq!(ciphertext.len(), 128);
        assert_ne!(encoded, "secret");
    }

    #[test]
    fn test_padding_is_randomized() {
        let first = encrypt_password("secret", VENDOR_PUBLIC_KEY).unwrap();
        let second = encrypt_password("secret", VENDOR_PUBLIC_KEY).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rejects_malformed_key() {
        let result = encrypt_password("secret", "-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----");
        assert!(matches!(result, Err(CryptoError::InvalidPublicKey { .. })));
    }

    #[test]
    fn test_rejects_empty_password() {
        let result = encrypt_password("", VENDOR_PUBLIC_KEY);
        assert_eq!(result, Err(CryptoError::EmptyPlaintext));
    }

    #[test]
    fn test_rejects_plaintext_longer_than_key_allows() {
        let too_long = "x".repeat(200);
        let result = encrypt_password(&too_long, VENDOR_PUBLIC_KEY);
        assert!(matches!(result, Err(CryptoError::EncryptionFailed { .. })));
    }
}
