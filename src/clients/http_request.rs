//! HTTP request types for the Renpho API client.
//!
//! This module provides the [`HttpRequest`] type and its builder, and the
//! [`PayloadValue`] tree used for request bodies.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the vendor API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET, used by every resource listing. Idempotent and retryable.
    Get,
    /// HTTP POST, used only by sign-in. Never retried automatically.
    Post,
}

impl HttpMethod {
    /// Returns `true` if a failed attempt may be repeated safely.
    #[must_use]
    pub const fn is_idempotent(self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// A request body value that may still contain raw bytes.
///
/// The sign-in ciphertext is produced as bytes, which JSON cannot carry.
/// [`PayloadValue::normalize`] walks the tree and decodes every
/// [`PayloadValue::Bytes`] leaf as UTF-8 text before transmission.
///
/// # Example
///
/// ```rust
/// use renpho_api::clients::PayloadValue;
/// use serde_json::json;
///
/// let payload = PayloadValue::object([
///     ("email", PayloadValue::from("someone@example.com")),
///     ("password", PayloadValue::Bytes(b"c2VjcmV0".to_vec())),
/// ]);
///
/// assert_eq!(
///     payload.normalize().unwrap(),
///     json!({"email": "someone@example.com", "password": "c2VjcmV0"})
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadValue {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(serde_json::Number),
    /// Text.
    Text(String),
    /// Raw bytes, decoded as UTF-8 on normalization.
    Bytes(Vec<u8>),
    /// An ordered sequence.
    List(Vec<PayloadValue>),
    /// A mapping with string keys.
    Object(BTreeMap<String, PayloadValue>),
}

impl PayloadValue {
    /// Builds an object from key/value pairs.
    #[must_use]
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Recursively converts this value into JSON, decoding byte leaves.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidPayload`] naming the first
    /// byte leaf that is not valid UTF-8.
    pub fn normalize(self) -> Result<Value, InvalidHttpRequestError> {
        self.normalize_at("")
    }

    fn normalize_at(self, path: &str) -> Result<Value, InvalidHttpRequestError> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(b) => Ok(Value::Bool(b)),
            Self::Number(n) => Ok(Value::Number(n)),
            Self::Text(s) => Ok(Value::String(s)),
            Self::Bytes(bytes) => String::from_utf8(bytes).map(Value::String).map_err(|_| {
                InvalidHttpRequestError::InvalidPayload {
                    field: path.to_string(),
                }
            }),
            Self::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| item.normalize_at(&format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Self::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    value.normalize_at(&child).map(|v| (key, v))
                })
                .collect::<Result<serde_json::Map<_, _>, _>>()
                .map(Value::Object),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for PayloadValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// An HTTP request to be sent to the vendor API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
/// Query parameters keep their insertion order.
///
/// # Example
///
/// ```rust
/// use renpho_api::clients::{HttpRequest, HttpMethod};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/v3/girths/list_girth.json")
///     .query_param("user_id", "42")
///     .query_param("locale", "en")
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query[0], ("user_id".to_string(), "42".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the base URL.
    pub path: String,
    /// The request body, if any.
    pub body: Option<PayloadValue>,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
    /// Send without ensuring an authenticated session first.
    pub skip_auth: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if a POST has no body or a GET
    /// has one.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (self.http_method, &self.body) {
            (HttpMethod::Post, None) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            (HttpMethod::Get, Some(_)) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Returns the value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Appends a query parameter, or replaces it if already present.
    pub fn set_query_param(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.query.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.query.push((key.to_string(), value));
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<PayloadValue>,
    query: Vec<(String, String)>,
    tries: u32,
    skip_auth: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            tries: 1,
            skip_auth: false,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<PayloadValue>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Only honoured for GET; POST requests are always sent once.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Sends the request without ensuring an authenticated session first.
    #[must_use]
    pub const fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            tries: self.tries,
            skip_auth: self.skip_auth,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
    }

    #[test]
    fn test_only_get_is_idempotent() {
        assert!(HttpMethod::Get.is_idempotent());
        assert!(!HttpMethod::Post.is_idempotent());
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "api/v2/measurements/list.json")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
        assert_eq!(request.tries, 1);
        assert!(!request.skip_auth);
    }

    #[test]
    fn test_verify_requires_body_for_post() {
        let result = HttpRequest::builder(HttpMethod::Post, "api/v3/users/sign_in.json").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));
    }

    #[test]
    fn test_verify_rejects_body_on_get() {
        let result = HttpRequest::builder(HttpMethod::Get, "x")
            .body("payload")
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnexpectedBody { .. })
        ));
    }

    #[test]
    fn test_query_params_keep_insertion_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "x")
            .query_param("user_id", "1")
            .query_param("last_at", "883612800")
            .query_param("locale", "en")
            .build()
            .unwrap();

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["user_id", "last_at", "locale"]);
        assert_eq!(request.query_value("last_at"), Some("883612800"));
    }

    #[test]
    fn test_set_query_param_replaces_existing_value() {
        let mut request = HttpRequest::builder(HttpMethod::Get, "x")
            .query_param("terminal_user_session_key", "old")
            .build()
            .unwrap();

        request.set_query_param("terminal_user_session_key", "new");
        request.set_query_param("app_id", "Renpho");

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query_value("terminal_user_session_key"), Some("new"));
    }

    #[test]
    fn test_normalize_decodes_nested_bytes() {
        let payload = PayloadValue::object([
            ("secure_flag", PayloadValue::from("1")),
            (
                "nested",
                PayloadValue::List(vec![
                    PayloadValue::Bytes(b"abc".to_vec()),
                    PayloadValue::from(json!({"n": 1})),
                ]),
            ),
        ]);

        assert_eq!(
            payload.normalize().unwrap(),
            json!({"secure_flag": "1", "nested": ["abc", {"n": 1}]})
        );
    }

    #[test]
    fn test_normalize_reports_invalid_utf8_path() {
        let payload = PayloadValue::object([(
            "outer",
            PayloadValue::List(vec![PayloadValue::Bytes(vec![0xff, 0xfe])]),
        )]);

        assert_eq!(
            payload.normalize(),
            Err(InvalidHttpRequestError::InvalidPayload {
                field: "outer[0]".to_string()
            })
        );
    }
}
