//! Scale user records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::UserId;
use crate::resources::record_field;

/// A person registered on one of the account's scales.
///
/// The first scale user returned after sign-in becomes the active subject
/// of every per-user query unless a user id was pinned explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleUser {
    /// The user whose measurements this entry refers to.
    pub user_id: UserId,
    /// MAC address of the scale.
    #[serde(rename = "mac", default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    /// Slot index of the user on the scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    /// Scale-side user key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScaleUser {
    /// Returns the field named `name`, if present and non-null.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        record_field(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scale_user_accepts_numeric_and_string_ids() {
        let users: Vec<ScaleUser> = serde_json::from_value(json!([
            {"user_id": "100", "mac": "AA:BB", "index": 0, "key": 1, "method": 2},
            {"user_id": 200, "scale_user_id": "7"}
        ]))
        .unwrap();

        assert_eq!(users[0].user_id.as_ref(), "100");
        assert_eq!(users[0].mac_address.as_deref(), Some("AA:BB"));
        assert_eq!(users[0].field("method"), Some(json!(2)));
        assert_eq!(users[1].user_id.as_ref(), "200");
        assert_eq!(users[1].index, None);
    }

    #[test]
    fn test_scale_user_requires_user_id() {
        let result: Result<ScaleUser, _> = serde_json::from_value(json!({"mac": "AA:BB"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_field_uses_vendor_name_for_mac() {
        let user: ScaleUser =
            serde_json::from_value(json!({"user_id": "1", "mac": "AA:BB"})).unwrap();
        assert_eq!(user.field("mac"), Some(json!("AA:BB")));
    }
}
