//! Growth records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::{record_field, timestamp_to_utc};

/// A child growth reading (height, weight, head circumference).
///
/// The vendor does not document this payload; only the timestamp is typed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthRecord {
    /// When the reading was taken, in unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<i64>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GrowthRecord {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_growth_record_fields() {
        let record: GrowthRecord =
            serde_json::from_value(json!({"time_stamp": 0, "height": 101.5})).unwrap();

        assert_eq!(record.field("height"), Some(json!(101.5)));
        assert_eq!(record.field("weight"), None);
        assert_eq!(
            record.measured_at().map(|t| t.timestamp()),
            Some(0)
        );
    }
}
