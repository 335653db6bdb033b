//! Sign-in response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::UserId;

/// The vendor's reply to a sign-in request.
///
/// Only the session key matters for the client; the account fields are kept
/// for callers that want to show who signed in. The status fields are read
/// through [`ApiResponse`](crate::clients::ApiResponse) and land in `extra`.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    /// The session key authorizing later requests.
    pub terminal_user_session_key: Option<String>,
    /// Account id, sent as a number.
    pub id: Option<Value>,
    /// Account email.
    pub email: Option<String>,
    /// Account display name.
    pub account_name: Option<String>,
    /// Every other field the vendor sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResponse {
    /// Returns the session key if it is present and non-empty.
    #[must_use]
    pub fn session_key(&self) -> Option<&str> {
        self.terminal_user_session_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    /// Returns the account id.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.id.as_ref().and_then(UserId::from_json)
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("terminal_user_session_key", &self.session_key().map(|_| "*****"))
            .field("id", &self.id)
            .field("email", &self.email)
            .field("account_name", &self.account_name)
            .finish_non_exhaustive()
    }
}
