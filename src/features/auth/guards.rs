//! Role-based authorization for the application.
//!
//! Roles are flat: "admin" may additionally read every user's reports and
//! logs; "user" may only read their own. Scope-style endpoints call
//! [`require_role`] after parsing the scope; admin-only routes use the
//! [`RequireAdmin`] extractor.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::models::{SessionContext, SessionUser};
use crate::shared::constants::ROLE_ADMIN;

/// Capability check: Ok if the authenticated user holds the role,
/// Forbidden otherwise.
pub fn require_role(user: &SessionUser, role: &str) -> Result<(), AppError> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden.".to_string()))
    }
}

/// Guard for admin-only routes.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub SessionUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<SessionContext>()
            .ok_or_else(|| AppError::Auth("Not authenticated.".to_string()))?;

        require_role(&context.user, ROLE_ADMIN)?;

        Ok(RequireAdmin(context.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: UserRole) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "t@example.com".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_role_admin() {
        assert!(require_role(&user(UserRole::Admin), ROLE_ADMIN).is_ok());
        let err = require_role(&user(UserRole::User), ROLE_ADMIN).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(msg) if msg == "Forbidden."));
    }
}
