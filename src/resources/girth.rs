//! Girth readings and girth goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::{record_field, timestamp_to_utc};

/// Suffix of catalog field names that refer to a girth goal.
const GOAL_SUFFIX: &str = "_goal_value";

/// One set of body girth readings, in centimetres.
///
/// Each body site is reported as `<site>_value` with a matching
/// `<site>_unit`; only the most commonly used sites are typed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Girth {
    /// Record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub girth_id: Option<i64>,
    /// When the reading was taken, in unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<i64>,
    /// Neck girth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_value: Option<f64>,
    /// Chest girth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_value: Option<f64>,
    /// Waist girth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_value: Option<f64>,
    /// Hip girth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_value: Option<f64>,
    /// Waist-to-hip ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whr_value: Option<f64>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Girth {
    /// Returns the field named `name`, if present and non-null.
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

/// A target value for one girth site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GirthGoal {
    /// Body site, e.g. `waist` or `left_thigh`.
    pub girth_type: String,
    /// Target value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_value: Option<f64>,
    /// Value when the goal was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<f64>,
    /// Value when the goal was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_value: Option<f64>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GirthGoal {
    /// Returns the field named `name`, if present and non-null.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        record_field(self, name)
    }

    /// Maps a metric field name to the girth site it targets.
    ///
    /// `waist_goal_value` and `waist` both name the `waist` site.
    #[must_use]
    pub fn girth_type_for(field: &str) -> &str {
        field.strip_suffix(GOAL_SUFFIX).unwrap_or(field)
    }

    /// Finds the goal for the site named by `field` and returns its target.
    #[must_use]
    pub fn lookup(goals: &[Self], field: &str) -> Option<Value> {
        let girth_type = Self::girth_type_for(field);
        goals
            .iter()
            .find(|goal| goal.girth_type == girth_type)
            .and_then(|goal| goal.field("goal_value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn goals() -> Vec<GirthGoal> {
        serde_json::from_value(json!([
            {"girth_type": "waist", "goal_value": 80.0, "goal_unit": 1},
            {"girth_type": "left_thigh", "goal_value": 55.5},
            {"girth_type": "neck"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_girth_field_lookup() {
        let girth: Girth = serde_json::from_value(json!({
            "waist_value": 82.5,
            "left_calf_value": 36.0,
            "custom": ""
        }))
        .unwrap();

        assert_eq!(girth.waist_value, Some(82.5));
        assert_eq!(girth.field("left_calf_value"), Some(json!(36.0)));
        assert_eq!(girth.field("hip_value"), None);
    }

    #[test]
    fn test_girth_type_for_strips_goal_suffix() {
        assert_eq!(GirthGoal::girth_type_for("waist_goal_value"), "waist");
        assert_eq!(GirthGoal::girth_type_for("right_calf_goal_value"), "right_calf");
        assert_eq!(GirthGoal::girth_type_for("waist"), "waist");
    }

    #[test]
    fn test_lookup_by_catalog_field_or_site_name() {
        let goals = goals();
        assert_eq!(GirthGoal::lookup(&goals, "waist_goal_value"), Some(json!(80.0)));
        assert_eq!(GirthGoal::lookup(&goals, "left_thigh"), Some(json!(55.5)));
    }

    #[test]
    fn test_lookup_missing_site_or_value() {
        let goals = goals();
        assert_eq!(GirthGoal::lookup(&goals, "hip_goal_value"), None);
        assert_eq!(GirthGoal::lookup(&goals, "neck_goal_value"), None);
        assert_eq!(GirthGoal::lookup(&[], "waist"), None);
    }
}
