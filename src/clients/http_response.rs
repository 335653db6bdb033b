//! HTTP response types for the Renpho API client.
//!
//! Every vendor response is a JSON object carrying a string `status_code`
//! and a `status_message` next to the resource payload. [`ApiResponse`]
//! keeps the parsed body and exposes the classified [`ApiStatus`].

use serde_json::Value;

/// Status code of a successful call.
pub const STATUS_OK: &str = "20000";

/// Status code signalling that the session key is no longer valid.
pub const STATUS_SESSION_EXPIRED: &str = "40302";

/// Status code signalling a server or account error.
pub const STATUS_SERVER_ERROR: &str = "50000";

/// Classified vendor status code.
///
/// Codes are compared as strings. The vendor has been observed to send them
/// as JSON strings; numeric codes are rendered to their decimal text first.
///
/// # Example
///
/// ```rust
/// use renpho_api::clients::ApiStatus;
///
/// assert_eq!(ApiStatus::from_code(Some("20000")), ApiStatus::Ok);
/// assert_eq!(ApiStatus::from_code(Some("40302")), ApiStatus::SessionExpired);
/// assert_eq!(ApiStatus::from_code(None), ApiStatus::Missing);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    /// `"20000"`.
    Ok,
    /// `"40302"`: the session key was rejected.
    SessionExpired,
    /// `"50000"`: server or account error.
    ServerError,
    /// Any other code.
    Other(String),
    /// The body had no `status_code`.
    Missing,
}

impl ApiStatus {
    /// Classifies a raw status code.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None => Self::Missing,
            Some(STATUS_OK) => Self::Ok,
            Some(STATUS_SESSION_EXPIRED) => Self::SessionExpired,
            Some(STATUS_SERVER_ERROR) => Self::ServerError,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Returns `true` for [`ApiStatus::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// A parsed response from the vendor API.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The parsed JSON body.
    pub body: Value,
    status_code: Option<String>,
}

impl ApiResponse {
    /// Creates a response from an HTTP status code and parsed body.
    #[must_use]
    pub fn new(code: u16, body: Value) -> Self {
        let status_code = match body.get("status_code") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            code,
            body,
            status_code,
        }
    }

    /// Returns the raw vendor status code, if present.
    #[must_use]
    pub fn status_code(&self) -> Option<&str> {
        self.status_code.as_deref()
    }

    /// Returns the vendor status message, if present.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.body.get("status_message").and_then(Value::as_str)
    }

    /// Returns the classified vendor status.
    #[must_use]
    pub fn status(&self) -> ApiStatus {
        ApiStatus::from_code(self.status_code())
    }

    /// Returns the body field named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes_are_compared_as_strings() {
        assert_eq!(ApiStatus::from_code(Some("20000")), ApiStatus::Ok);
        assert_eq!(ApiStatus::from_code(Some("50000")), ApiStatus::ServerError);
        assert_eq!(
            ApiStatus::from_code(Some("020000")),
            ApiStatus::Other("020000".to_string())
        );
    }

    #[test]
    fn test_response_reads_status_and_message() {
        let response = ApiResponse::new(
            200,
            json!({"status_code": "20000", "status_message": "ok", "last_ary": []}),
        );

        assert_eq!(response.status(), ApiStatus::Ok);
        assert_eq!(response.status_code(), Some("20000"));
        assert_eq!(response.status_message(), Some("ok"));
        assert_eq!(response.get("last_ary"), Some(&json!([])));
    }

    #[test]
    fn test_numeric_status_code_is_rendered_as_text() {
        let response = ApiResponse::new(200, json!({"status_code": 40302}));
        assert_eq!(response.status(), ApiStatus::SessionExpired);
    }

    #[test]
    fn test_missing_status_code() {
        let response = ApiResponse::new(200, json!({"foo": "bar"}));
        assert_eq!(response.status(), ApiStatus::Missing);
        assert!(!response.status().is_ok());
    }
}
