use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Public projection of a user owned by the identity service.
///
/// Only the fields that read models join in are carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
}
