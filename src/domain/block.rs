//! Block-list entries.

use serde::{Deserialize, Serialize};

use super::lenient::lenient;

/// A user on someone's block list. Also the body for adding one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockedUser {
    #[serde(deserialize_with = "lenient")]
    pub user_id: String,
}

impl BlockedUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
