//! Transport and vendor error types.
//!
//! # Error Handling
//!
//! Remote calls can fail at two distinct layers:
//!
//! - [`TransportError`]: the HTTP exchange itself failed (network error,
//!   non-2xx status, unreadable body, retries exhausted)
//! - [`ApiError`]: the exchange succeeded but the vendor's embedded status
//!   code reports a server or account error
//!
//! Transport failures on idempotent GET requests are retried a bounded
//! number of times before surfacing. Vendor errors are never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use renpho_api::clients::{HttpClient, HttpRequest, HttpMethod, TransportError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("status {:?}", response.status()),
//!     Err(TransportError::Response(e)) => println!("HTTP {}: {}", e.code, e.message),
//!     Err(TransportError::MaxRetries(e)) => println!("gave up after {} tries", e.tries),
//!     Err(e) => println!("transport failure: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use renpho_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Not Found".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: Not Found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or the canonical reason when the body was empty.
    pub message: String,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a GET request keeps failing with a network error, a 429, or a
/// 5xx response after all configured attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response, if one was received.
    pub code: Option<u16>,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Description of the last failure.
    pub message: String,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request carried a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that does not take a body.
        method: String,
    },

    /// A binary payload value was not valid UTF-8 text.
    #[error("Payload field '{field}' is not valid UTF-8 text.")]
    InvalidPayload {
        /// Path of the offending value, e.g. `password` or `items[2]`.
        field: String,
    },
}

/// Unified error type for HTTP transport failures.
///
/// Use pattern matching to handle specific failure kinds.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A non-2xx HTTP response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Could not decode response body: {message}")]
    Decode {
        /// Parser error detail.
        message: String,
    },
}

/// A business error reported by the vendor inside a well-formed response.
///
/// The vendor signals these through the `status_code` field of the JSON
/// body (compared as a string), e.g. `"50000"` for server or account errors.
///
/// # Example
///
/// ```rust
/// use renpho_api::clients::ApiError;
///
/// let error = ApiError {
///     status_code: "50000".to_string(),
///     message: "Email not exist".to_string(),
/// };
/// assert!(error.to_string().contains("50000"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Renpho API error {status_code}: {message}")]
pub struct ApiError {
    /// The vendor status code, e.g. `"50000"`.
    pub status_code: String,
    /// The vendor status message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_includes_status_code_in_message() {
        let error = HttpResponseError {
            code: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: Some(500),
            tries: 3,
            message: "Internal Server Error".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
    }

    #[test]
    fn test_invalid_payload_names_field() {
        let error = InvalidHttpRequestError::InvalidPayload {
            field: "password".to_string(),
        };
        assert!(error.to_string().contains("password"));
    }

    #[test]
    fn test_api_error_message_contains_vendor_message() {
        let error = ApiError {
            status_code: "50000".to_string(),
            message: "server busy".to_string(),
        };
        assert_eq!(error.to_string(), "Renpho API error 50000: server busy");
    }

    #[test]
    fn test_transport_error_wraps_response_error() {
        let error: TransportError = HttpResponseError {
            code: 404,
            message: "Not Found".to_string(),
        }
        .into();
        assert!(matches!(error, TransportError::Response(ref e) if e.code == 404));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
        };
        let _ = response_error;

        let api_error: &dyn std::error::Error = &ApiError {
            status_code: "50000".to_string(),
            message: "test".to_string(),
        };
        let _ = api_error;
    }
}
