//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Renpho account email address.
///
/// # Example
///
/// ```rust
/// use renpho_api::Email;
///
/// let email = Email::new("  someone@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "someone@example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Creates a new validated email.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be non-empty and
    /// contain an `@` that is neither the first nor the last character.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEmail`] if the email is malformed.
    pub fn new(email: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into().trim().to_string();
        let valid = email
            .find('@')
            .is_some_and(|at| at > 0 && at + 1 < email.len());
        if !valid {
            return Err(ConfigError::InvalidEmail { email });
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Renpho account password, held in memory only.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// # Example
///
/// ```rust
/// use renpho_api::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Returns the plaintext password.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A Renpho user identifier.
///
/// Identifies the person whose measurements are queried. The vendor issues
/// these as numbers but they are only ever echoed back, so they are kept as
/// opaque strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id from a non-empty string.
    ///
    /// Returns `None` for empty or whitespace-only input, which the setup
    /// flow uses to mean "not pinned".
    #[must_use]
    pub fn parse_optional(id: impl AsRef<str>) -> Option<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    /// Creates a user id from a JSON value (number or string).
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse_optional(s),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| de::Error::custom("user id must be a non-empty string or number"))
    }
}

/// A validated base URL for the vendor API.
///
/// Trailing slashes are removed so endpoint paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use renpho_api::BaseUrl;
///
/// let url = BaseUrl::new("https://renpho.qnclouds.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://renpho.qnclouds.com");
/// assert_eq!(url.host_name(), Some("renpho.qnclouds.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the URL uses the
    /// `http` or `https` scheme and names a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// The production vendor host, `https://renpho.qnclouds.com`.
    pub(crate) fn vendor_default() -> Self {
        Self {
            url: "https://renpho.qnclouds.com".to_string(),
            host_start: "https://".len(),
            host_end: "https://renpho.qnclouds.com".len(),
        }
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Joins an absolute endpoint path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rejects_malformed_values() {
        assert!(matches!(Email::new(""), Err(ConfigError::InvalidEmail { .. })));
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("someone@").is_err());
        assert!(Email::new("someone@example.com").is_ok());
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("super-secret").unwrap();
        let debug_output = format!("{:?}", password);
        assert_eq!(debug_output, "Password(*****)");
        assert!(!debug_output.contains("super-secret"));
        assert_eq!(password.expose(), "super-secret");
    }

    #[test]
    fn test_password_rejects_empty_string() {
        assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
    }

    #[test]
    fn test_user_id_treats_blank_as_unpinned() {
        assert!(UserId::parse_optional("").is_none());
        assert!(UserId::parse_optional("   ").is_none());
        assert_eq!(UserId::parse_optional(" 42 ").unwrap().as_ref(), "42");
    }

    #[test]
    fn test_user_id_from_json_number_and_string() {
        let from_number = UserId::from_json(&serde_json::json!(123_456)).unwrap();
        assert_eq!(from_number.as_ref(), "123456");

        let from_string = UserId::from_json(&serde_json::json!("abc")).unwrap();
        assert_eq!(from_string.as_ref(), "abc");

        assert!(UserId::from_json(&serde_json::json!(null)).is_none());
    }

    #[test]
    fn test_user_id_deserializes_from_number() {
        let id: UserId = serde_json::from_str("987").unwrap();
        assert_eq!(id.as_ref(), "987");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""987""#);
    }

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://renpho.qnclouds.com").unwrap();
        assert_eq!(url.host_name(), Some("renpho.qnclouds.com"));

        let url = BaseUrl::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("renpho.qnclouds.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("ftp://renpho.qnclouds.com").is_err());
        assert!(BaseUrl::new("https://renpho.qnclouds.com?x=1").is_err());
    }

    #[test]
    fn test_vendor_default_matches_parsed_url() {
        let parsed = BaseUrl::new("https://renpho.qnclouds.com").unwrap();
        assert_eq!(BaseUrl::vendor_default(), parsed);
    }

    #[test]
    fn test_base_url_join() {
        let url = BaseUrl::new("https://renpho.qnclouds.com/").unwrap();
        assert_eq!(
            url.join("/api/v2/measurements/list.json"),
            "https://renpho.qnclouds.com/api/v2/measurements/list.json"
        );
    }
}
