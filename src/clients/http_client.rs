//! HTTP client for Renpho API communication.
//!
//! This module provides the [`HttpClient`] type, the transport underneath
//! [`SessionClient`](crate::SessionClient). It knows nothing about sessions:
//! it sends one [`HttpRequest`], retries idempotent requests on transient
//! failures, and parses the JSON body.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{
    HttpResponseError, MaxHttpRetriesExceededError, TransportError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::ApiResponse;
use crate::config::{BaseUrl, RenphoConfig};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Query parameter carrying the session key.
pub const SESSION_KEY_PARAM: &str = "terminal_user_session_key";

/// HTTP client for making requests to the vendor API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - A per-request timeout
/// - Bounded retries for GET on network errors, 429 and 5xx responses
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use renpho_api::RenphoConfig;
/// use renpho_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = RenphoConfig::default();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/v2/measurements/list.json")
///     .query_param("user_id", "42")
///     .tries(3)
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
    retry_delay: Duration,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &RenphoConfig) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Renpho API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            retry_delay: config.retry_delay(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a request, query string included.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let mut url = self.base_url.join(&request.path);
        append_query(&mut url, &request.query, false);
        url
    }

    /// Builds the URL for a request with the session key masked, for logs.
    #[must_use]
    pub fn redacted_url_for(&self, request: &HttpRequest) -> String {
        let mut url = self.base_url.join(&request.path);
        append_query(&mut url, &request.query, true);
        url
    }

    /// Sends an HTTP request to the vendor API.
    ///
    /// The body is normalized (byte leaves decoded as UTF-8) before
    /// sending. GET requests are attempted up to `request.tries` times;
    /// POST requests are always attempted exactly once.
    ///
    /// The vendor's embedded status code is not inspected here.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if:
    /// - Request validation or payload normalization fails (`InvalidRequest`)
    /// - A network error occurs on the only attempt (`Network`)
    /// - A non-2xx response is received and not retried (`Response`)
    /// - The body is not JSON (`Decode`)
    /// - Retries are exhausted (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<ApiResponse, TransportError> {
        request.verify()?;

        let url = self.url_for(&request);
        let log_url = self.redacted_url_for(&request);
        let body = request.body.clone().map(|b| b.normalize()).transpose()?;
        let max_tries = if request.http_method.is_idempotent() {
            request.tries.max(1)
        } else {
            1
        };

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(method = %request.http_method, url = %log_url, attempt = tries, "Sending request");

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
            };
            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = &body {
                req_builder = req_builder.json(body);
            }

            let res = match req_builder.send().await {
                Ok(res) => res,
                Err(e) => {
                    if tries >= max_tries {
                        return Err(network_failure(e, max_tries));
                    }
                    tracing::warn!(url = %log_url, attempt = tries, error = %e, "Request failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
            };

            let status = res.status();
            let code = status.as_u16();
            let body_text = match res.text().await {
                Ok(text) => text,
                Err(e) if status.is_success() => {
                    if tries >= max_tries {
                        return Err(network_failure(e, max_tries));
                    }
                    tracing::warn!(url = %log_url, attempt = tries, error = %e, "Reading response body failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
                Err(_) => String::new(),
            };

            if status.is_success() {
                let parsed = if body_text.trim().is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(&body_text).map_err(|e| TransportError::Decode {
                        message: e.to_string(),
                    })?
                };
                return Ok(ApiResponse::new(code, parsed));
            }

            let message = if body_text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                body_text
            };

            let should_retry = code == 429 || status.is_server_error();
            if !should_retry || max_tries == 1 {
                return Err(HttpResponseError { code, message }.into());
            }
            if tries >= max_tries {
                return Err(MaxHttpRetriesExceededError {
                    code: Some(code),
                    tries: max_tries,
                    message,
                }
                .into());
            }

            tracing::warn!(url = %log_url, attempt = tries, code, "Transient HTTP status, retrying");
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

fn network_failure(error: reqwest::Error, max_tries: u32) -> TransportError {
    if max_tries == 1 {
        TransportError::Network(error)
    } else {
        MaxHttpRetriesExceededError {
            code: None,
            tries: max_tries,
            message: error.to_string(),
        }
        .into()
    }
}

fn append_query(url: &mut String, query: &[(String, String)], redact: bool) {
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        if redact && key == SESSION_KEY_PARAM {
            url.push_str("*****");
        } else {
            url.push_str(&urlencoding::encode(value));
        }
    }
}
