//! Metric groups and the sensor catalog.
//!
//! The vendor bundles many scalar readings into a few grouped responses.
//! A [`MetricGroup`] names one such bundle; a [`MetricDefinition`] names one
//! scalar inside it. [`SessionClient::get_specific_metric`] caches one record
//! per group and serves every field read from it, so exposing sixty sensors
//! does not cost sixty requests.
//!
//! [`SessionClient::get_specific_metric`]: crate::SessionClient::get_specific_metric
//!
//! # Example
//!
//! ```rust
//! use renpho_api::metrics::{find_metric, MetricGroup};
//! use renpho_api::WeightUnit;
//! use serde_json::json;
//!
//! let weight = find_metric("weight").unwrap();
//! assert_eq!(weight.group, MetricGroup::Weight);
//! assert_eq!(weight.unique_id(), "renpho_weight");
//! assert_eq!(weight.display_unit(WeightUnit::Pounds), "lbs");
//!
//! let shown = weight.display_value(&json!(10.0), WeightUnit::Pounds);
//! assert!((shown.as_f64().unwrap() - 22.046226218).abs() < 1e-9);
//! ```

mod catalog;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::config::WeightUnit;
use crate::resources::Endpoint;

pub use catalog::METRIC_CATALOG;

/// A named bundle of scalar readings served by one endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricGroup {
    /// Body-composition fields of the latest measurement.
    Weight,
    /// Fields of the latest girth reading.
    Girth,
    /// Girth targets, looked up by body site.
    GirthGoals,
    /// Fields of the latest growth record.
    GrowthRecord,
}

impl MetricGroup {
    /// All groups.
    pub const ALL: [Self; 4] = [Self::Weight, Self::Girth, Self::GirthGoals, Self::GrowthRecord];

    /// The group's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Girth => "girth",
            Self::GirthGoals => "girth_goals",
            Self::GrowthRecord => "growth_record",
        }
    }

    /// The endpoint that serves this group.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Weight => Endpoint::Measurements,
            Self::Girth => Endpoint::Girth,
            Self::GirthGoals => Endpoint::GirthGoals,
            Self::GrowthRecord => Endpoint::GrowthRecords,
        }
    }

    /// The response key holding the group's records.
    #[must_use]
    pub const fn container_key(self) -> &'static str {
        match self {
            Self::Weight => "last_ary",
            Self::Girth => "girths",
            Self::GirthGoals => "girth_goals",
            Self::GrowthRecord => "growths",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown metric group name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown metric group '{0}'. Expected one of: weight, girth, girth_goals, growth_record.")]
pub struct UnknownMetricGroup(pub String);

impl FromStr for MetricGroup {
    type Err = UnknownMetricGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| UnknownMetricGroup(s.to_string()))
    }
}

/// One sensor the integration can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Field name inside the group's record.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Unit as reported by the vendor; empty for unitless values.
    pub unit: &'static str,
    /// Coarse category, e.g. `Measurements` or `Goals`.
    pub category: &'static str,
    /// Finer grouping label, e.g. `Body Composition`.
    pub label: &'static str,
    /// Group whose record carries this field.
    pub group: MetricGroup,
}

impl MetricDefinition {
    /// Stable identifier: `renpho_` followed by the slugified name.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("renpho_{}", slugify(self.name))
    }

    /// Returns `true` if the vendor reports this metric in kilograms.
    #[must_use]
    pub fn is_mass(&self) -> bool {
        self.unit == "kg"
    }

    /// Unit to display under the given preference.
    #[must_use]
    pub fn display_unit(&self, preference: WeightUnit) -> &'static str {
        if self.is_mass() {
            preference.symbol()
        } else {
            self.unit
        }
    }

    /// Converts a raw value for display under the given preference.
    ///
    /// Only numeric mass readings are converted; everything else is returned
    /// unchanged.
    #[must_use]
    pub fn display_value(&self, value: &Value, preference: WeightUnit) -> Value {
        if !self.is_mass() || preference == WeightUnit::Kilograms {
            return value.clone();
        }
        value
            .as_f64()
            .map(|kg| Value::from(preference.convert_from_kg(kg)))
            .unwrap_or_else(|| value.clone())
    }
}

/// Returns the catalog entry with the given field id.
#[must_use]
pub fn find_metric(id: &str) -> Option<&'static MetricDefinition> {
    METRIC_CATALOG.iter().find(|metric| metric.id == id)
}

/// Returns every catalog entry served by `group`.
pub fn metrics_in_group(group: MetricGroup) -> impl Iterator<Item = &'static MetricDefinition> {
    METRIC_CATALOG.iter().filter(move |metric| metric.group == group)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}
