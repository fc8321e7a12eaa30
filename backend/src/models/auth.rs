//! Credentials, login payloads and the identity carried by a verified session.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

/// Placeholder shown until the portal exposes the student's legal name.
pub const DEFAULT_DISPLAY_NAME: &str = "McGill Student";

/// Portal username/password pair. Never persisted; `Debug` masks the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True only for the reserved demo identity.
    pub fn is_demo(&self) -> bool {
        is_demo(&self.username, &self.password)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn is_demo(username: &str, password: &str) -> bool {
    username == DEMO_USERNAME && password == DEMO_PASSWORD
}

/// Request-supplied credentials only ever select the demo dataset.
pub fn overrides_to_demo(username: Option<&str>, password: Option<&str>) -> bool {
    matches!((username, password), (Some(u), Some(p)) if is_demo(u, p))
}

/// Identity attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct Session {
    pub credential: Credential,
    pub is_demo: bool,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.credential.username
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Credentials submitted by a student attempting to authenticate.
pub struct LoginRequest {
    #[serde(default, alias = "identity")]
    pub username: String,
    #[serde(default, alias = "secret")]
    pub password: String,
}

impl LoginRequest {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Successful login: the bearer token plus the authenticated username.
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl From<&Session> for UserResponse {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username().to_string(),
            name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }
}
