use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::models::{SessionContext, SessionUser};

/// Extractor for handlers that require an authenticated caller.
///
/// The session middleware resolves the cookie and stores a
/// [`SessionContext`] in the request extensions; this rejects with the
/// wire-level 401 when none is present.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .map(|c| c.user.clone())
            .ok_or_else(|| AppError::Auth("Not authenticated.".to_string()))
    }
}

/// Extractor for handlers where authentication is optional (the session
/// check and logout). Never rejects.
pub struct OptionalSession(pub Option<SessionContext>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(
            parts.extensions.get::<SessionContext>().cloned(),
        ))
    }
}
