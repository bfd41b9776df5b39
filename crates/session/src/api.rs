//! Transport collaborator contract.
//!
//! The session layer consumes these endpoints and nothing else; request
//! framing (headers, timeouts, base path) belongs to the implementation.

use async_trait::async_trait;
use serde::Serialize;

use medconsole_core::{ApiResult, MenuNode, UserProfile};

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration form. The server creates the account and returns a token,
/// logging the new user straight in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub real_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The authentication/authorization endpoints the session consumes.
///
/// Implementations map transport failures to `ApiError::Network`, envelope
/// code 401 to `ApiError::Auth`, and any other non-200 envelope code to
/// `ApiError::Server`.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> ApiResult<String>;

    /// Create an account; returns the token of the freshly logged-in user.
    async fn register(&self, form: &RegisterForm) -> ApiResult<String>;

    /// Invalidate the session server-side.
    async fn logout(&self) -> ApiResult<()>;

    /// The current user's profile.
    async fn fetch_profile(&self) -> ApiResult<UserProfile>;

    /// The menu tree granted to the current user, already validated.
    async fn fetch_menus(&self) -> ApiResult<Vec<MenuNode>>;

    /// The permission codes granted to the current user.
    async fn fetch_permissions(&self) -> ApiResult<Vec<String>>;
}
