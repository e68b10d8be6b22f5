use serde::{Deserialize, Serialize};

use super::UserId;

/// Identity verified from a bearer token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}
