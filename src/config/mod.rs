//! Configuration types for the Renpho API client.
//!
//! This module provides the immutable, process-wide settings shared by every
//! [`SessionClient`](crate::SessionClient) built from it.
//!
//! # Overview
//!
//! - [`RenphoConfig`]: endpoint host, vendor key, timeouts, retry and polling settings
//! - [`RenphoConfigBuilder`]: a builder for constructing [`RenphoConfig`] instances
//! - [`Email`], [`Password`], [`UserId`]: validated account values
//! - [`BaseUrl`]: a validated API base URL
//! - [`WeightUnit`]: unit-of-measurement preference
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use renpho_api::{RenphoConfig, WeightUnit};
//!
//! let config = RenphoConfig::builder()
//!     .refresh_interval(Duration::from_secs(600))
//!     .weight_unit(WeightUnit::Pounds)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.app_id(), "Renpho");
//! ```

mod newtypes;
mod units;

pub use newtypes::{BaseUrl, Email, Password, UserId};
pub use units::{WeightUnit, KG_TO_LBS};

use std::time::Duration;

use crate::error::ConfigError;

/// Default vendor API host.
pub const DEFAULT_BASE_URL: &str = "https://renpho.qnclouds.com";

/// Default `app_id` query parameter.
pub const DEFAULT_APP_ID: &str = "Renpho";

/// Default `locale` query parameter.
pub const DEFAULT_LOCALE: &str = "en";

/// RSA public key the vendor uses to decrypt sign-in passwords.
pub const VENDOR_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQC+25I2upukpfQ7rIaaTZtVE744
u2zV+HaagrUhDOTq8fMVf9yFQvEZh2/HKxFudUxP0dXUa8F6X4XmWumHdQnum3zm
Jr04fz2b2WCcN0ta/rbF2nYAnMVAk2OJVZAMudOiMWhcxV1nNJiKgTNNr13de0EQ
IiOL2CUBzu+HmIfUbQIDAQAB
-----END PUBLIC KEY-----";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default polling interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Default number of attempts for idempotent GET requests.
pub const DEFAULT_MAX_TRIES: u32 = 3;

/// Default wait between GET retries.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Configuration for the Renpho API client.
///
/// Built once per process and passed to every client at construction; there
/// are no module-level globals.
///
/// # Thread Safety
///
/// `RenphoConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct RenphoConfig {
    base_url: BaseUrl,
    public_key_pem: String,
    app_id: String,
    locale: String,
    request_timeout: Duration,
    max_tries: u32,
    retry_delay: Duration,
    refresh_interval: Duration,
    weight_unit: WeightUnit,
    user_agent_prefix: Option<String>,
}

impl RenphoConfig {
    /// Creates a new builder for constructing a `RenphoConfig`.
    #[must_use]
    pub fn builder() -> RenphoConfigBuilder {
        RenphoConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the PEM-encoded RSA public key used for sign-in.
    #[must_use]
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Returns the `app_id` sent with every request.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the `locale` sent with every request.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the number of attempts made for GET requests.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the wait between GET retries.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the polling interval.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the preferred mass unit.
    #[must_use]
    pub const fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for RenphoConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::vendor_default(),
            public_key_pem: VENDOR_PUBLIC_KEY.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_tries: DEFAULT_MAX_TRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            weight_unit: WeightUnit::default(),
            user_agent_prefix: None,
        }
    }
}

// Verify RenphoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RenphoConfig>();
};

/// Builder for constructing [`RenphoConfig`] instances.
///
/// Every field has a default, so `RenphoConfig::builder().build()` yields a
/// configuration pointed at the production vendor host.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `public_key_pem`: [`VENDOR_PUBLIC_KEY`]
/// - `app_id`: `"Renpho"`, `locale`: `"en"`
/// - `request_timeout`: 30 seconds
/// - `max_tries`: 3, `retry_delay`: 1 second
/// - `refresh_interval`: 60 seconds
/// - `weight_unit`: kilograms
#[derive(Debug, Default)]
pub struct RenphoConfigBuilder {
    base_url: Option<BaseUrl>,
    public_key_pem: Option<String>,
    app_id: Option<String>,
    locale: Option<String>,
    request_timeout: Option<Duration>,
    max_tries: Option<u32>,
    retry_delay: Option<Duration>,
    refresh_interval: Option<Duration>,
    weight_unit: Option<WeightUnit>,
    user_agent_prefix: Option<String>,
}

impl RenphoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (e.g., a mock server in tests).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the RSA public key used to encrypt the password.
    #[must_use]
    pub fn public_key_pem(mut self, pem: impl Into<String>) -> Self {
        self.public_key_pem = Some(pem.into());
        self
    }

    /// Sets the `app_id` query parameter.
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Sets the `locale` query parameter.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the number of attempts for GET requests. Values below 1 are raised to 1.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Sets the wait between GET retries.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the polling interval.
    #[must_use]
    pub const fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Sets the preferred mass unit.
    #[must_use]
    pub const fn weight_unit(mut self, unit: WeightUnit) -> Self {
        self.weight_unit = Some(unit);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`RenphoConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRefreshInterval`] if the refresh
    /// interval is zero, or [`ConfigError::MissingRequiredField`] if the
    /// public key or `app_id` was set to an empty string.
    pub fn build(self) -> Result<RenphoConfig, ConfigError> {
        let defaults = RenphoConfig::default();

        let refresh_interval = self.refresh_interval.unwrap_or(defaults.refresh_interval);
        if refresh_interval.is_zero() {
            return Err(ConfigError::InvalidRefreshInterval);
        }

        let public_key_pem = self.public_key_pem.unwrap_or(defaults.public_key_pem);
        if public_key_pem.trim().is_empty() {
            return Err(ConfigError::MissingRequiredField {
                field: "public_key_pem",
            });
        }

        let app_id = self.app_id.unwrap_or(defaults.app_id);
        if app_id.is_empty() {
            return Err(ConfigError::MissingRequiredField { field: "app_id" });
        }

        Ok(RenphoConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            public_key_pem,
            app_id,
            locale: self.locale.unwrap_or(defaults.locale),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_tries: self.max_tries.unwrap_or(defaults.max_tries).max(1),
            retry_delay: self.retry_delay.unwrap_or(defaults.retry_delay),
            refresh_interval,
            weight_unit: self.weight_unit.unwrap_or(defaults.weight_unit),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
