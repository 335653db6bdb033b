//! Vendor endpoints and the records they return.
//!
//! # Overview
//!
//! - [`Endpoint`]: every remote resource, with its path and query shape
//! - [`MeasurementSnapshot`]: one body-composition reading (`last_ary`)
//! - [`ScaleUser`]: a person registered on the account's scales
//! - [`Girth`] and [`GirthGoal`]: body girth readings and targets
//! - [`GrowthRecord`]: child growth readings
//! - [`LoginResponse`]: the sign-in reply
//!
//! Records keep the documented fields typed and everything else in an
//! `extra` map, so [`MeasurementSnapshot::field`] and friends can serve any
//! field the vendor sends by name.

mod girth;
mod growth;
mod login;
mod measurement;
mod scale_user;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpMethod;

pub use girth::{Girth, GirthGoal};
pub use growth::GrowthRecord;
pub use login::LoginResponse;
pub use measurement::MeasurementSnapshot;
pub use scale_user::ScaleUser;

/// Unix timestamp of 1998-01-01T00:00:00Z.
///
/// Sent as the "changed since" anchor on every listing so the vendor
/// returns the full history.
pub const HISTORY_ANCHOR: i64 = 883_612_800;

/// Body key holding the scale user listing.
pub const SCALE_USERS_KEY: &str = "scale_users";

/// Returns [`HISTORY_ANCHOR`] as a UTC timestamp.
#[must_use]
pub fn history_anchor() -> DateTime<Utc> {
    Utc.timestamp_opt(HISTORY_ANCHOR, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A remote vendor resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /api/v3/users/sign_in.json`.
    SignIn,
    /// Scale users on the account.
    ScaleUsers,
    /// Body-composition measurements.
    Measurements,
    /// Bound scale details.
    DeviceInfo,
    /// Latest scale firmware/model information.
    LatestModel,
    /// Girth readings.
    Girth,
    /// Girth goals.
    GirthGoals,
    /// Growth records.
    GrowthRecords,
    /// In-app messages.
    Messages,
    /// Account profile.
    RequestUser,
    /// Goal achievement state.
    ReachGoal,
}

impl Endpoint {
    /// All endpoints, sign-in first.
    pub const ALL: [Self; 11] = [
        Self::SignIn,
        Self::ScaleUsers,
        Self::Measurements,
        Self::DeviceInfo,
        Self::LatestModel,
        Self::Girth,
        Self::GirthGoals,
        Self::GrowthRecords,
        Self::Messages,
        Self::RequestUser,
        Self::ReachGoal,
    ];

    /// Path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SignIn => "api/v3/users/sign_in.json",
            Self::ScaleUsers => "api/v3/scale_users/list_scale_user",
            Self::Measurements => "api/v2/measurements/list.json",
            Self::DeviceInfo => "api/v2/device_binds/get_device.json",
            Self::LatestModel => "api/v3/devices/list_lastest_model.json",
            Self::Girth => "api/v3/girths/list_girth.json",
            Self::GirthGoals => "api/v3/girth_goals/list_girth_goal.json",
            Self::GrowthRecords => "api/v3/growth_records/list_growth_record.json",
            Self::Messages => "api/v2/messages/list.json",
            Self::RequestUser => "api/v2/users/request_user.json",
            Self::ReachGoal => "api/v3/users/reach_goal.json",
        }
    }

    /// HTTP method used by this endpoint.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::SignIn => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }

    /// Name of the query parameter carrying [`HISTORY_ANCHOR`], if any.
    #[must_use]
    pub const fn anchor_param(self) -> Option<&'static str> {
        match self {
            Self::SignIn | Self::ScaleUsers => None,
            Self::Measurements => Some("last_at"),
            _ => Some("last_updated_at"),
        }
    }

    /// Whether the query names the active user.
    #[must_use]
    pub const fn requires_user(self) -> bool {
        !matches!(self, Self::SignIn | Self::ScaleUsers)
    }

    /// Returns the endpoint whose path is `path`, if any.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/');
        Self::ALL.into_iter().find(|e| e.path() == path)
    }
}

/// Reads a non-null field from a serializable record by name.
pub(crate) fn record_field<T: Serialize>(record: &T, name: &str) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut map)) => map.remove(name).filter(|v| !v.is_null()),
        _ => None,
    }
}

/// Converts a unix timestamp in seconds to UTC.
pub(crate) fn timestamp_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_anchor_is_start_of_1998() {
        assert_eq!(history_anchor().to_rfc3339(), "1998-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_measurements_use_last_at_anchor() {
        assert_eq!(Endpoint::Measurements.anchor_param(), Some("last_at"));
        assert_eq!(Endpoint::Girth.anchor_param(), Some("last_updated_at"));
        assert_eq!(Endpoint::ScaleUsers.anchor_param(), None);
    }

    #[test]
    fn test_only_sign_in_is_post() {
        for endpoint in Endpoint::ALL {
            let expected = if endpoint == Endpoint::SignIn {
                HttpMethod::Post
            } else {
                HttpMethod::Get
            };
            assert_eq!(endpoint.method(), expected, "{endpoint:?}");
        }
    }

    #[test]
    fn test_from_path_round_trips() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_path(endpoint.path()), Some(endpoint));
        }
        assert_eq!(
            Endpoint::from_path("/api/v3/users/sign_in.json"),
            Some(Endpoint::SignIn)
        );
        assert_eq!(Endpoint::from_path("api/v9/unknown"), None);
    }
}
