//! The stateful Renpho session client.
//!
//! [`SessionClient`] owns the HTTP transport, the current session key, the
//! active user and the latest record of every resource group. Every remote
//! call goes through [`SessionClient::request`], which signs in on demand.
//!
//! # Session Lifecycle
//!
//! ```text
//! Unauthenticated --authenticate()--> Authenticating --ok--> Authenticated
//!        ^                                  |                     |
//!        +------------ failure -------------+                     |
//!        +---- logout() / close() / "40302" session expired ------+
//! ```
//!
//! Concurrent callers that find the client unauthenticated share a single
//! sign-in: whoever reaches the sign-in latch first performs the exchange,
//! and everyone queued behind it adopts that outcome.
//!
//! A `"40302"` response clears the session key but is not retried; the
//! *next* request signs in again.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{
    encrypt_password, AuthFailureReason, AuthState, AuthenticationError, Credentials, Session,
};
use crate::clients::errors::{ApiError, TransportError};
use crate::clients::http_client::{HttpClient, SESSION_KEY_PARAM};
use crate::clients::http_request::{HttpMethod, HttpRequest, PayloadValue};
use crate::clients::http_response::{ApiResponse, ApiStatus};
use crate::config::{RenphoConfig, UserId};
use crate::error::RenphoError;
use crate::metrics::{MetricDefinition, MetricGroup};
use crate::resources::{
    Endpoint, Girth, GirthGoal, GrowthRecord, LoginResponse, MeasurementSnapshot, ScaleUser,
    HISTORY_ANCHOR, SCALE_USERS_KEY,
};

/// The latest record of every resource group.
///
/// Each field is replaced wholesale by the next successful fetch of its
/// resource; records are never merged.
#[derive(Clone, Debug, Default)]
pub struct Snapshots {
    /// First entry of the latest measurements listing.
    pub measurement: Option<MeasurementSnapshot>,
    /// Latest scale user listing.
    pub scale_users: Option<Vec<ScaleUser>>,
    /// First entry of the latest girth listing.
    pub girth: Option<Girth>,
    /// Latest girth goal listing.
    pub girth_goals: Option<Vec<GirthGoal>>,
    /// First entry of the latest growth record listing.
    pub growth_record: Option<GrowthRecord>,
    /// Latest device info body.
    pub device_info: Option<Value>,
    /// Latest model listing body.
    pub latest_model: Option<Value>,
    /// Latest message listing body.
    pub messages: Option<Value>,
    /// When any field last changed.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of one [`SessionClient::refresh_all`] cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshReport {
    /// The user the cycle fetched for.
    pub user_id: Option<UserId>,
    /// Whether a measurements listing was received.
    pub measurement_updated: bool,
    /// Whether a girth listing was received.
    pub girth_updated: bool,
    /// Whether a girth goal listing was received.
    pub girth_goals_updated: bool,
    /// When the cycle finished.
    pub completed_at: DateTime<Utc>,
}

impl RefreshReport {
    /// Returns `true` if every resource in the cycle was received.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.measurement_updated && self.girth_updated && self.girth_goals_updated
    }
}

#[derive(Debug, Default)]
struct ClientState {
    session: Option<Session>,
    login_attempts: u64,
    last_login: Option<Result<Session, AuthenticationError>>,
    user_id: Option<UserId>,
    user_pinned: bool,
    snapshots: Snapshots,
}

/// Client for one Renpho account.
///
/// Construct one per configured account and share it behind an `Arc`; every
/// method takes `&self`.
///
/// # Example
///
/// ```rust,ignore
/// use renpho_api::{Credentials, Email, Password, RenphoConfig, SessionClient};
/// use renpho_api::metrics::MetricGroup;
///
/// let client = SessionClient::new(
///     RenphoConfig::default(),
///     Credentials::new(Email::new("someone@example.com")?, Password::new("hunter2")?),
///     None,
/// );
///
/// if client.validate_credentials().await {
///     let weight = client.get_specific_metric(MetricGroup::Weight, "weight", None).await?;
///     println!("latest weight: {weight:?}");
/// }
/// ```
pub struct SessionClient {
    config: RenphoConfig,
    credentials: Credentials,
    transport: Mutex<Option<HttpClient>>,
    state: Mutex<ClientState>,
    login_latch: tokio::sync::Mutex<()>,
}

// Verify SessionClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionClient>();
};

impl SessionClient {
    /// Creates a client for one account.
    ///
    /// A `user_id` pins the subject of every per-user query; without one,
    /// the first scale user on the account is used.
    #[must_use]
    pub fn new(config: RenphoConfig, credentials: Credentials, user_id: Option<UserId>) -> Self {
        let state = ClientState {
            user_pinned: user_id.is_some(),
            user_id,
            ..ClientState::default()
        };
        Self {
            config,
            credentials,
            transport: Mutex::new(None),
            state: Mutex::new(state),
            login_latch: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &RenphoConfig {
        &self.config
    }

    /// Returns the current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        if self.login_latch.try_lock().is_err() {
            return AuthState::Authenticating;
        }
        if self.lock_state().session.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Returns `true` if a session key is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_state().session.is_some()
    }

    /// Returns the current session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.lock_state().session.clone()
    }

    /// Returns the active user.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.lock_state().user_id.clone()
    }

    /// Pins the active user.
    ///
    /// Cached records belong to the previous user and are dropped when the
    /// user changes. A pinned user is never replaced by the scale user
    /// lookup.
    pub fn set_user_id(&self, user_id: UserId) {
        let mut state = self.lock_state();
        state.user_pinned = true;
        if state.user_id.as_ref() != Some(&user_id) {
            tracing::debug!(user_id = %user_id, "Switching active user");
            state.user_id = Some(user_id);
            state.snapshots = Snapshots::default();
        }
    }

    /// Returns a copy of the cached records.
    #[must_use]
    pub fn snapshots(&self) -> Snapshots {
        self.lock_state().snapshots.clone()
    }

    /// Returns the cached measurement, if any.
    #[must_use]
    pub fn latest_measurement(&self) -> Option<MeasurementSnapshot> {
        self.lock_state().snapshots.measurement.clone()
    }

    /// Signs in and stores the new session.
    ///
    /// If another caller is already signing in, waits for that exchange and
    /// returns its outcome instead of starting a second one. Otherwise a
    /// fresh sign-in is always performed, even if a session is held.
    ///
    /// # Errors
    ///
    /// - [`RenphoError::Crypto`] if the password cannot be encrypted with the
    ///   configured public key; no request is sent
    /// - [`RenphoError::Authentication`] if the exchange fails
    ///
    /// Either way the client is left without a session.
    pub async fn authenticate(&self) -> Result<Session, RenphoError> {
        let seen = self.lock_state().login_attempts;
        let _latch = self.login_latch.lock().await;

        {
            let state = self.lock_state();
            if state.login_attempts != seen {
                if let Some(outcome) = state.last_login.clone() {
                    tracing::debug!("Joined in-flight sign-in");
                    return outcome.map_err(RenphoError::from);
                }
            }
        }

        let ciphertext = match encrypt_password(
            self.credentials.password().expose(),
            self.config.public_key_pem(),
        ) {
            Ok(ciphertext) => ciphertext,
            Err(e) => {
                tracing::error!(error = %e, "Could not encrypt password for sign-in");
                self.lock_state().session = None;
                return Err(e.into());
            }
        };

        tracing::info!("Signing in to Renpho");
        let outcome = self.sign_in(ciphertext).await;

        {
            let mut state = self.lock_state();
            state.login_attempts += 1;
            match &outcome {
                Ok(session) => {
                    tracing::info!(account_id = ?session.user_id, "Signed in to Renpho");
                    state.session = Some(session.clone());
                }
                Err(e) => {
                    tracing::warn!(reason = %e.reason(), error = %e, "Sign-in failed");
                    state.session = None;
                }
            }
            state.last_login = Some(outcome.clone());
        }

        outcome.map_err(RenphoError::from)
    }

    /// Probes the credentials by signing in.
    ///
    /// Returns `true` on success. The failure reason is logged; call
    /// [`authenticate`](Self::authenticate) directly to inspect it.
    pub async fn validate_credentials(&self) -> bool {
        match self.authenticate().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "Credential validation failed");
                false
            }
        }
    }

    /// Drops the session key. The next request signs in again.
    pub fn logout(&self) {
        if self.lock_state().session.take().is_some() {
            tracing::info!("Logged out of Renpho");
        }
    }

    /// Drops the session key and the HTTP transport.
    ///
    /// The transport is re-created on the next request.
    pub fn close(&self) {
        self.logout();
        let mut transport = self.transport.lock().unwrap_or_else(PoisonError::into_inner);
        if transport.take().is_some() {
            tracing::debug!("Closed HTTP transport");
        }
    }

    /// Sends a request, signing in first if needed.
    ///
    /// The session key is appended to every request except sign-in and
    /// requests built with [`skip_auth`](crate::clients::HttpRequestBuilder::skip_auth).
    ///
    /// A `"40302"` response clears the session and is returned as-is; it
    /// is not retried. A `"50000"` response is turned into an error.
    ///
    /// # Errors
    ///
    /// - [`RenphoError::Authentication`] if an on-demand sign-in fails
    /// - [`RenphoError::Transport`] if the HTTP exchange fails
    /// - [`RenphoError::Api`] if the vendor reports a server error
    pub async fn request(&self, mut request: HttpRequest) -> Result<ApiResponse, RenphoError> {
        let transport = self.transport()?;

        let is_sign_in = Endpoint::from_path(&request.path) == Some(Endpoint::SignIn);
        if !is_sign_in && !request.skip_auth {
            let held = self.token();
            let token = match held {
                Some(token) => token,
                None => {
                    tracing::warn!("No session key found, signing in");
                    self.authenticate().await?.token
                }
            };
            request.set_query_param(SESSION_KEY_PARAM, token);
        }

        self.dispatch(&transport, request).await
    }

    /// Fetches the account's scale users.
    ///
    /// Unless a user is pinned, the first entry becomes the active user.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures; a response without a
    /// `scale_users` list yields `Ok(None)`.
    pub async fn get_scale_users(&self) -> Result<Option<Vec<ScaleUser>>, RenphoError> {
        let Some(response) = self.get(Endpoint::ScaleUsers, None).await? else {
            return Ok(None);
        };
        let Some(users) =
            extract_list::<ScaleUser>(&response, Endpoint::ScaleUsers, SCALE_USERS_KEY)
        else {
            return Ok(None);
        };

        let mut state = self.lock_state();
        match users.first() {
            Some(first) if !state.user_pinned => {
                if state.user_id.as_ref() != Some(&first.user_id) {
                    tracing::info!(user_id = %first.user_id, "Active user set from first scale user");
                    state.user_id = Some(first.user_id.clone());
                    state.snapshots = Snapshots::default();
                }
            }
            Some(_) => {}
            None => tracing::warn!("Account has no scale users"),
        }
        state.snapshots.scale_users = Some(users.clone());
        state.snapshots.updated_at = Some(Utc::now());
        Ok(Some(users))
    }

    /// Fetches the active user's measurements, newest first.
    ///
    /// The first entry replaces the cached measurement.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures; a response without a
    /// `last_ary` list yields `Ok(None)`.
    pub async fn get_measurements(&self) -> Result<Option<Vec<MeasurementSnapshot>>, RenphoError> {
        let measurements = self
            .fetch_group::<MeasurementSnapshot>(MetricGroup::Weight)
            .await?;
        if let Some(measurements) = &measurements {
            if measurements.is_empty() {
                tracing::warn!("No measurements recorded yet");
            }
            self.update_snapshots(|s| s.measurement = measurements.first().cloned());
        }
        Ok(measurements)
    }

    /// Fetches the latest measurement and returns its weight with it.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn get_weight(&self) -> Result<Option<(f64, MeasurementSnapshot)>, RenphoError> {
        let latest = self
            .get_measurements()
            .await?
            .and_then(|measurements| measurements.into_iter().next());
        Ok(latest.and_then(|snapshot| snapshot.weight.map(|weight| (weight, snapshot))))
    }

    /// Signs in, resolves the active user and fetches measurements.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] if any step fails hard.
    pub async fn get_info(&self) -> Result<Option<Vec<MeasurementSnapshot>>, RenphoError> {
        self.authenticate().await?;
        self.get_scale_users().await?;
        self.get_measurements().await
    }

    /// Fetches the active user's girth readings.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures; a response without a
    /// `girths` list yields `Ok(None)`.
    pub async fn list_girth(&self) -> Result<Option<Vec<Girth>>, RenphoError> {
        let girths = self.fetch_group::<Girth>(MetricGroup::Girth).await?;
        if let Some(girths) = &girths {
            self.update_snapshots(|s| s.girth = girths.first().cloned());
        }
        Ok(girths)
    }

    /// Fetches the active user's girth goals.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures; a response without a
    /// `girth_goals` list yields `Ok(None)`.
    pub async fn list_girth_goal(&self) -> Result<Option<Vec<GirthGoal>>, RenphoError> {
        let goals = self.fetch_group::<GirthGoal>(MetricGroup::GirthGoals).await?;
        if let Some(goals) = &goals {
            self.update_snapshots(|s| s.girth_goals = Some(goals.clone()));
        }
        Ok(goals)
    }

    /// Fetches the active user's growth records.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures; a response without a
    /// `growths` list yields `Ok(None)`.
    pub async fn list_growth_record(&self) -> Result<Option<Vec<GrowthRecord>>, RenphoError> {
        let records = self
            .fetch_group::<GrowthRecord>(MetricGroup::GrowthRecord)
            .await?;
        if let Some(records) = &records {
            self.update_snapshots(|s| s.growth_record = records.first().cloned());
        }
        Ok(records)
    }

    /// Fetches details of the bound scales.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn get_device_info(&self) -> Result<Option<Value>, RenphoError> {
        let body = self.fetch_body(Endpoint::DeviceInfo).await?;
        if let Some(body) = &body {
            self.update_snapshots(|s| s.device_info = Some(body.clone()));
        }
        Ok(body)
    }

    /// Fetches the latest scale model information.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn list_latest_model(&self) -> Result<Option<Value>, RenphoError> {
        let body = self.fetch_body(Endpoint::LatestModel).await?;
        if let Some(body) = &body {
            self.update_snapshots(|s| s.latest_model = Some(body.clone()));
        }
        Ok(body)
    }

    /// Fetches the user's in-app messages.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn message_list(&self) -> Result<Option<Value>, RenphoError> {
        let body = self.fetch_body(Endpoint::Messages).await?;
        if let Some(body) = &body {
            self.update_snapshots(|s| s.messages = Some(body.clone()));
        }
        Ok(body)
    }

    /// Fetches the account profile.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn request_user(&self) -> Result<Option<Value>, RenphoError> {
        self.fetch_body(Endpoint::RequestUser).await
    }

    /// Fetches the goal achievement state.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] for hard failures.
    pub async fn reach_goal(&self) -> Result<Option<Value>, RenphoError> {
        self.fetch_body(Endpoint::ReachGoal).await
    }

    /// Reads one field of a metric group.
    ///
    /// Serves the read from the group's cached record, fetching it first if
    /// nothing is cached. Girth goals are looked up by body site:
    /// `waist_goal_value` (or plain `waist`) returns the `goal_value` of the
    /// `waist` goal.
    ///
    /// A `user_id` pins the active user first, as
    /// [`set_user_id`](Self::set_user_id) does.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] if fetching the group fails hard. A missing
    /// container or field yields `Ok(None)`.
    pub async fn get_specific_metric(
        &self,
        group: MetricGroup,
        field: &str,
        user_id: Option<UserId>,
    ) -> Result<Option<Value>, RenphoError> {
        if let Some(user_id) = user_id {
            self.set_user_id(user_id);
        }

        let cached = self.snapshots();
        let value = match group {
            MetricGroup::Weight => {
                let snapshot = match cached.measurement {
                    Some(snapshot) => Some(snapshot),
                    None => self.get_measurements().await?.and_then(first),
                };
                snapshot.and_then(|s| s.field(field))
            }
            MetricGroup::Girth => {
                let girth = match cached.girth {
                    Some(girth) => Some(girth),
                    None => self.list_girth().await?.and_then(first),
                };
                girth.and_then(|g| g.field(field))
            }
            MetricGroup::GirthGoals => {
                let goals = match cached.girth_goals {
                    Some(goals) => Some(goals),
                    None => self.list_girth_goal().await?,
                };
                goals.and_then(|goals| GirthGoal::lookup(&goals, field))
            }
            MetricGroup::GrowthRecord => {
                let record = match cached.growth_record {
                    Some(record) => Some(record),
                    None => self.list_growth_record().await?.and_then(first),
                };
                record.and_then(|r| r.field(field))
            }
        };

        if value.is_none() {
            tracing::debug!(group = %group, key = group.container_key(), field, "Metric not available");
        }
        Ok(value)
    }

    /// Reads a catalog metric, converted for display.
    ///
    /// # Errors
    ///
    /// Returns [`RenphoError`] if fetching the metric's group fails hard.
    pub async fn read_metric(
        &self,
        metric: &MetricDefinition,
    ) -> Result<Option<Value>, RenphoError> {
        let value = self.get_specific_metric(metric.group, metric.id, None).await?;
        Ok(value.map(|v| metric.display_value(&v, self.config.weight_unit())))
    }

    /// Runs one refresh cycle.
    ///
    /// Signs in if needed, resolves the active user if none is set, then
    /// fetches measurements, girth and girth goals one after another. Every
    /// fetch is attempted even if an earlier one failed.
    ///
    /// # Errors
    ///
    /// Returns the first hard failure of the cycle.
    pub async fn refresh_all(&self) -> Result<RefreshReport, RenphoError> {
        if !self.is_authenticated() {
            self.authenticate().await?;
        }
        if self.user_id().is_none() {
            self.get_scale_users().await?;
        }

        let mut first_error = None;
        let measurement_updated =
            settle("measurements", self.get_measurements().await, &mut first_error);
        let girth_updated = settle("girth", self.list_girth().await, &mut first_error);
        let girth_goals_updated =
            settle("girth goals", self.list_girth_goal().await, &mut first_error);

        if let Some(e) = first_error {
            return Err(e);
        }

        let report = RefreshReport {
            user_id: self.user_id(),
            measurement_updated,
            girth_updated,
            girth_goals_updated,
            completed_at: Utc::now(),
        };
        tracing::debug!(complete = report.is_complete(), "Refresh cycle finished");
        Ok(report)
    }

    fn lock_state(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self) -> Option<String> {
        self.lock_state().session.as_ref().map(|s| s.token.clone())
    }

    fn update_snapshots(&self, update: impl FnOnce(&mut Snapshots)) {
        let mut state = self.lock_state();
        update(&mut state.snapshots);
        state.snapshots.updated_at = Some(Utc::now());
    }

    fn transport(&self) -> Result<HttpClient, TransportError> {
        let mut transport = self.transport.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = transport.as_ref() {
            return Ok(client.clone());
        }
        tracing::debug!("Creating HTTP transport");
        let client = HttpClient::new(&self.config)?;
        *transport = Some(client.clone());
        Ok(client)
    }

    async fn dispatch(
        &self,
        transport: &HttpClient,
        request: HttpRequest,
    ) -> Result<ApiResponse, RenphoError> {
        let path = request.path.clone();
        let sent_token = request.query_value(SESSION_KEY_PARAM).map(str::to_string);
        let response = transport.request(request).await?;

        match response.status() {
            ApiStatus::SessionExpired => {
                let mut state = self.lock_state();
                let held_token = state.session.as_ref().map(|s| s.token.as_str());
                if sent_token.is_some() && held_token == sent_token.as_deref() {
                    state.session = None;
                    tracing::warn!(path = %path, "Session key rejected; the next request will sign in again");
                } else {
                    tracing::debug!(path = %path, "Stale session key rejected; keeping current session");
                }
            }
            ApiStatus::ServerError => {
                return Err(ApiError {
                    status_code: response.status_code().unwrap_or_default().to_string(),
                    message: response
                        .status_message()
                        .unwrap_or("Unknown error")
                        .to_string(),
                }
                .into());
            }
            _ => {}
        }

        Ok(response)
    }

    async fn sign_in(&self, ciphertext: String) -> Result<Session, AuthenticationError> {
        let body = PayloadValue::object([
            ("secure_flag", PayloadValue::from("1")),
            ("email", PayloadValue::from(self.credentials.email().to_string())),
            ("password", PayloadValue::Bytes(ciphertext.into_bytes())),
        ]);
        let request = HttpRequest::builder(HttpMethod::Post, Endpoint::SignIn.path())
            .query_param("app_id", self.config.app_id())
            .body(body)
            .build()
            .map_err(|e| AuthenticationError::Transport {
                message: e.to_string(),
            })?;

        let transport = self
            .transport()
            .map_err(|e| AuthenticationError::Transport {
                message: e.to_string(),
            })?;

        let response = match self.dispatch(&transport, request).await {
            Ok(response) => response,
            Err(RenphoError::Api(e)) => {
                return Err(AuthenticationError::Rejected {
                    reason: AuthFailureReason::classify(&e.status_code, &e.message),
                    status_code: e.status_code,
                    message: e.message,
                });
            }
            Err(RenphoError::Authentication(e)) => return Err(e),
            Err(e) => {
                return Err(AuthenticationError::Transport {
                    message: e.to_string(),
                });
            }
        };

        if let ApiStatus::SessionExpired | ApiStatus::Other(_) = response.status() {
            let status_code = response.status_code().unwrap_or_default().to_string();
            let message = response.status_message().unwrap_or_default().to_string();
            return Err(AuthenticationError::Rejected {
                reason: AuthFailureReason::classify(&status_code, &message),
                status_code,
                message,
            });
        }

        let login: LoginResponse =
            serde_json::from_value(response.body).map_err(|e| AuthenticationError::MalformedResponse {
                reason: e.to_string(),
            })?;
        let Some(session_key) = login.session_key() else {
            return Err(AuthenticationError::MalformedResponse {
                reason: "'terminal_user_session_key' missing".to_string(),
            });
        };

        Ok(Session::new(session_key.to_string(), login.user_id()))
    }

    async fn active_user(&self) -> Result<Option<UserId>, RenphoError> {
        if let Some(user_id) = self.user_id() {
            return Ok(Some(user_id));
        }
        tracing::debug!("No active user, looking up scale users");
        self.get_scale_users().await?;
        Ok(self.user_id())
    }

    fn resource_request(
        &self,
        endpoint: Endpoint,
        user_id: Option<&UserId>,
    ) -> Result<HttpRequest, TransportError> {
        let mut builder =
            HttpRequest::builder(endpoint.method(), endpoint.path()).tries(self.config.max_tries());
        if let Some(user_id) = user_id {
            builder = builder.query_param("user_id", user_id.to_string());
        }
        if let Some(anchor) = endpoint.anchor_param() {
            builder = builder.query_param(anchor, HISTORY_ANCHOR.to_string());
        }
        builder = builder.query_param("locale", self.config.locale());
        if endpoint.requires_user() {
            builder = builder.query_param("app_id", self.config.app_id());
        }
        Ok(builder.build()?)
    }

    async fn get(
        &self,
        endpoint: Endpoint,
        user_id: Option<&UserId>,
    ) -> Result<Option<ApiResponse>, RenphoError> {
        let request = self.resource_request(endpoint, user_id)?;
        let response = self.request(request).await?;

        match response.status() {
            ApiStatus::Ok | ApiStatus::Missing => Ok(Some(response)),
            status => {
                tracing::warn!(endpoint = ?endpoint, status = ?status, "Ignoring response");
                Ok(None)
            }
        }
    }

    async fn fetch_for_user(&self, endpoint: Endpoint) -> Result<Option<ApiResponse>, RenphoError> {
        let Some(user_id) = self.active_user().await? else {
            tracing::warn!(endpoint = ?endpoint, "No active user; skipping request");
            return Ok(None);
        };
        self.get(endpoint, Some(&user_id)).await
    }

    async fn fetch_group<T: DeserializeOwned>(
        &self,
        group: MetricGroup,
    ) -> Result<Option<Vec<T>>, RenphoError> {
        let endpoint = group.endpoint();
        Ok(self
            .fetch_for_user(endpoint)
            .await?
            .and_then(|response| extract_list(&response, endpoint, group.container_key())))
    }

    async fn fetch_body(&self, endpoint: Endpoint) -> Result<Option<Value>, RenphoError> {
        Ok(self
            .fetch_for_user(endpoint)
            .await?
            .map(|response| response.body))
    }
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", self.config.base_url())
            .field("credentials", &self.credentials)
            .field("auth_state", &self.auth_state())
            .field("user_id", &self.user_id())
            .finish_non_exhaustive()
    }
}

fn first<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}

fn extract_list<T: DeserializeOwned>(
    response: &ApiResponse,
    endpoint: Endpoint,
    key: &str,
) -> Option<Vec<T>> {
    let Some(value) = response.get(key) else {
        tracing::warn!(endpoint = ?endpoint, key, "Expected list missing from response");
        return None;
    };
    match serde_json::from_value::<Vec<T>>(value.clone()) {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::warn!(endpoint = ?endpoint, key, error = %e, "Malformed list in response");
            None
        }
    }
}

fn settle<T>(
    resource: &str,
    result: Result<Option<T>, RenphoError>,
    first_error: &mut Option<RenphoError>,
) -> bool {
    match result {
        Ok(value) => value.is_some(),
        Err(e) => {
            tracing::warn!(resource, error = %e, "Refresh step failed");
            first_error.get_or_insert(e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Email, Password};

    fn client(user_id: Option<&str>) -> SessionClient {
        SessionClient::new(
            RenphoConfig::default(),
            Credentials::new(
                Email::new("someone@example.com").unwrap(),
                Password::new("hunter2").unwrap(),
            ),
            user_id.and_then(UserId::parse_optional),
        )
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let client = client(None);
        assert_eq!(client.auth_state(), AuthState::Unauthenticated);
        assert!(client.session().is_none());
        assert!(client.user_id().is_none());
    }

    #[test]
    fn test_constructor_pins_user() {
        let client = client(Some("42"));
        assert_eq!(client.user_id().map(|u| u.to_string()), Some("42".to_string()));
        assert!(client.lock_state().user_pinned);
    }

    #[test]
    fn test_set_user_id_drops_cached_records_on_change() {
        let client = client(Some("1"));
        client.update_snapshots(|s| s.measurement = Some(MeasurementSnapshot::default()));

        client.set_user_id(UserId::parse_optional("1").unwrap());
        assert!(client.latest_measurement().is_some());

        client.set_user_id(UserId::parse_optional("2").unwrap());
        assert!(client.latest_measurement().is_none());
    }

    #[test]
    fn test_resource_request_query_shape() {
        let client = client(None);
        let user = UserId::parse_optional("42").unwrap();

        let measurements = client
            .resource_request(Endpoint::Measurements, Some(&user))
            .unwrap();
        let keys: Vec<&str> = measurements.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["user_id", "last_at", "locale", "app_id"]);
        assert_eq!(measurements.query_value("last_at"), Some("883612800"));
        assert_eq!(measurements.tries, 3);

        let scale_users = client.resource_request(Endpoint::ScaleUsers, None).unwrap();
        let keys: Vec<&str> = scale_users.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["locale"]);
    }

    #[test]
    fn test_logout_and_close_clear_session() {
        let client = client(None);
        client.lock_state().session = Some(Session::new("token".to_string(), None));
        assert_eq!(client.auth_state(), AuthState::Authenticated);

        client.logout();
        assert_eq!(client.auth_state(), AuthState::Unauthenticated);

        client.lock_state().session = Some(Session::new("token".to_string(), None));
        client.transport().unwrap();
        client.close();
        assert!(!client.is_authenticated());
        assert!(client.transport.lock().unwrap().is_none());
    }

    #[test]
    fn test_refresh_report_completeness() {
        let report = RefreshReport {
            user_id: None,
            measurement_updated: true,
            girth_updated: true,
            girth_goals_updated: false,
            completed_at: Utc::now(),
        };
        assert!(!report.is_complete());
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let client = client(None);
        let debug = format!("{client:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("SessionClient"));
    }
}
