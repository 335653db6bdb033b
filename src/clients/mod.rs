//! HTTP client types for Renpho cloud communication.
//!
//! This module provides the transport layer and the stateful
//! [`SessionClient`] built on it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`SessionClient`]: Signs in on demand and exposes one method per resource
//! - [`HttpClient`]: The async HTTP client with retry logic
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`ApiResponse`]: A parsed response with its vendor status code
//! - [`PayloadValue`]: Request body values, including raw bytes
//!
//! # Example
//!
//! ```rust,ignore
//! use renpho_api::clients::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "api/v3/scale_users/list_scale_user")
//!     .query_param("locale", "en")
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! assert!(response.status().is_ok());
//! ```
//!
//! # Retry Behavior
//!
//! The HTTP layer retries transient failures of idempotent requests:
//!
//! - **Network errors, 429 and 5xx**: Retried after the configured delay
//! - **Other HTTP errors**: Returned immediately without retry
//! - **POST requests**: Sent exactly once
//!
//! Vendor status codes travel in the JSON body and are never retried here;
//! a `"40302"` response only clears the session in [`SessionClient`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod session_client;

pub use errors::{
    ApiError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    TransportError,
};
pub use http_client::{HttpClient, SDK_VERSION, SESSION_KEY_PARAM};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, PayloadValue};
pub use http_response::{
    ApiResponse, ApiStatus, STATUS_OK, STATUS_SERVER_ERROR, STATUS_SESSION_EXPIRED,
};
pub use session_client::{RefreshReport, SessionClient, Snapshots};
