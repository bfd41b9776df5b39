//! Authenticated user profile.

use serde::{Deserialize, Serialize};

/// Primary role values assigned by the server.
pub const ROLE_ADMIN: i32 = 0;
pub const ROLE_DOCTOR: i32 = 1;
pub const ROLE_ORDINARY_USER: i32 = 2;

/// The current user's record as returned by the profile endpoint.
///
/// Sensitive fields (password hash) are stripped server-side and never
/// modeled here. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub real_name: String,
    /// Primary role value, see the `ROLE_*` constants.
    pub role: i32,
    /// Role codes for the evaluator's role predicates.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl UserProfile {
    pub fn is_ordinary_user(&self) -> bool {
        self.role == ROLE_ORDINARY_USER
    }
}
