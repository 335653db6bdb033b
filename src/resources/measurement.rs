//! Body-composition measurement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::{record_field, timestamp_to_utc};

/// The most recent body-composition record for a user.
///
/// Immutable once fetched; every successful poll replaces the cached
/// snapshot wholesale. The common readings are typed; the remaining
/// physiological fields (segmental fat, resistances, girth estimates, ...)
/// live in [`extra`](Self::extra) and are reachable through
/// [`field`](Self::field).
///
/// # Example
///
/// ```rust
/// use renpho_api::MeasurementSnapshot;
/// use serde_json::json;
///
/// let snapshot: MeasurementSnapshot = serde_json::from_value(json!({
///     "weight": 70.5,
///     "bodyfat": 18.2,
///     "time_stamp": 1700000000,
///     "heart_rate": 64
/// })).unwrap();
///
/// assert_eq!(snapshot.weight, Some(70.5));
/// assert_eq!(snapshot.field("heart_rate"), Some(json!(64)));
/// assert_eq!(snapshot.field("water"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSnapshot {
    /// Record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_user_id: Option<i64>,
    /// When the reading was taken, in unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<i64>,
    /// Body weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Body mass index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Body fat percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyfat: Option<f64>,
    /// Body water percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    /// Basal metabolic rate, kcal/day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmr: Option<f64>,
    /// Bone mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bone: Option<f64>,
    /// Muscle mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle: Option<f64>,
    /// Subcutaneous fat percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfat: Option<f64>,
    /// Visceral fat level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visfat: Option<f64>,
    /// Protein percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Metabolic body age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyage: Option<f64>,
    /// Scale MAC address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Scale display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_name: Option<String>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeasurementSnapshot {
    /// Returns the field named `name`, typed or not, if present and non-null.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        record_field(self, name)
    }

    /// Returns when the reading was taken.
    #[must_use]
    pub fn measured_at(&self) -> Option<DateTime<Utc>> {
        self.time_stamp.and_then(timestamp_to_utc)
    }
}
