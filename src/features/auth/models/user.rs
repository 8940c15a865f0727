use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_USER};

/// Account role. Assigned once at signup; there is no path that mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

/// Database model for a user account. `password_hash` never leaves the
/// auth service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// The public snapshot of a user carried by a session and echoed to the
/// client as `{user: ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_str() == role
    }
}

impl From<&User> for SessionUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// Database model for a session row. The user fields are a snapshot taken
/// at login time; see DESIGN.md for the freshness trade-off.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub user_created_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.user_id,
            email: self.email.clone(),
            role: self.role,
            created_at: self.user_created_at,
        }
    }
}

/// Per-request authenticated identity, injected into request extensions by
/// the session middleware and read by extractors.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: Uuid,
    pub user: SessionUser,
}
