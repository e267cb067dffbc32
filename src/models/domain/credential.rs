use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::UserRole;

/// Identity record backing sign-in. Never serialized to clients.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub uid: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    #[serde(default)]
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}
