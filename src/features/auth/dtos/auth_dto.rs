use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::auth::models::SessionUser;

/// Query string for `/auth`: selects the operation, e.g. `?action=login`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AuthActionQuery {
    #[serde(default)]
    pub action: String,
}

/// Request body for signup and login. Missing fields default to empty
/// strings so that an absent or malformed body yields the required-fields
/// validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CredentialsDto {
    #[serde(default)]
    #[validate(length(max = 255, message = "Email must not exceed 255 characters."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "Password must not exceed 1024 characters."))]
    pub password: String,
}

/// Response body for a successful login: `{user: {...}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: SessionUser,
}

/// Response body for the session check: `{user: <user>|null}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}
