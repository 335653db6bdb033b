//! # Renpho API Rust Client
//!
//! An async client for the Renpho smart-scale cloud API, providing
//! type-safe configuration, password encryption for the sign-in exchange,
//! a session-managing HTTP client and a background polling loop.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`RenphoConfig`] and [`RenphoConfigBuilder`]
//! - Validated newtypes for account credentials and endpoint values
//! - RSA encryption of the account password via [`auth::encrypt_password`]
//! - A [`SessionClient`] that signs in on demand, shares concurrent sign-ins
//!   and recovers from expired session keys
//! - Typed records for measurements, girth readings, girth goals and growth records
//! - A metric catalog for exposing individual readings as sensors
//! - A [`PollingLoop`] that refreshes the cached records on an interval
//!
//! ## Quick Start
//!
//! ```rust
//! use renpho_api::{Credentials, Email, Password, RenphoConfig, SessionClient, WeightUnit};
//!
//! // Create configuration using the builder pattern
//! let config = RenphoConfig::builder()
//!     .weight_unit(WeightUnit::Pounds)
//!     .build()
//!     .unwrap();
//!
//! let credentials = Credentials::new(
//!     Email::new("someone@example.com").unwrap(),
//!     Password::new("hunter2").unwrap(),
//! );
//!
//! // No request is made until a method is called
//! let client = SessionClient::new(config, credentials, None);
//! assert!(!client.is_authenticated());
//! ```
//!
//! ## Reading Metrics
//!
//! ```rust,ignore
//! use renpho_api::metrics::{find_metric, MetricGroup};
//!
//! // One request per group; later reads are served from the cached record
//! let weight = client.get_specific_metric(MetricGroup::Weight, "weight", None).await?;
//! let bodyfat = client.get_specific_metric(MetricGroup::Weight, "bodyfat", None).await?;
//!
//! // Catalog metrics are converted to the configured weight unit
//! let muscle = client.read_metric(find_metric("muscle").unwrap()).await?;
//! ```
//!
//! ## Polling
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use renpho_api::PollingLoop;
//!
//! let client = Arc::new(client);
//! let polling = PollingLoop::new(Arc::clone(&client));
//! polling.start_default();
//!
//! // ... later
//! if let Some(measurement) = client.latest_measurement() {
//!     println!("weight: {:?}", measurement.weight);
//! }
//! polling.stop().await;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Soft failures**: A response missing its payload is `Ok(None)`, not an error

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod metrics;
pub mod polling;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{AuthFailureReason, AuthState, AuthenticationError, Credentials, CryptoError, Session};
pub use config::{
    BaseUrl, Email, Password, RenphoConfig, RenphoConfigBuilder, UserId, WeightUnit,
};
pub use error::{ConfigError, RenphoError};

// Re-export client types
pub use clients::{
    ApiError, ApiResponse, ApiStatus, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder,
    RefreshReport, SessionClient, Snapshots, TransportError,
};

// Re-export resource and metric types
pub use metrics::{MetricDefinition, MetricGroup};
pub use polling::PollingLoop;
pub use resources::{Girth, GirthGoal, GrowthRecord, MeasurementSnapshot, ScaleUser};
