use axum_extra::extract::cookie::{Cookie, SameSite};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{Session, SessionContext, User};

/// Server-side session store backed by the `sessions` table.
///
/// The cookie only carries an opaque token; the row holds the snapshot of
/// the user's public fields. The cookie itself has no max-age (it lives for
/// the browser session) while the row expires after the configured TTL.
pub struct SessionService {
    pool: PgPool,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(pool: PgPool, config: SessionConfig) -> Self {
        Self { pool, config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Create a session row for a freshly authenticated user and return the
    /// cookie to set.
    pub async fn create(&self, user: &User) -> Result<(SessionContext, Cookie<'static>)> {
        let token = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, email, role, user_created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, NOW() + make_interval(secs => $6))
            "#,
        )
        .bind(token)
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role)
        .bind(user.created_at)
        .bind(self.config.ttl_secs as f64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {:?}", e);
            AppError::Database(e)
        })?;

        let context = SessionContext {
            token,
            user: user.into(),
        };

        Ok((context, self.build_cookie(token)))
    }

    /// Resolve a token to a live session, ignoring expired rows.
    pub async fn load(&self, token: Uuid) -> Result<Option<SessionContext>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, email, role, user_created_at, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(session.map(|s| SessionContext {
            token: s.token,
            user: s.user(),
        }))
    }

    /// Invalidate a session token. Deleting an already-absent row is fine.
    pub async fn destroy(&self, token: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to destroy session: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    /// Opportunistic cleanup of expired rows, run at login time so no
    /// background task is needed.
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    fn build_cookie(&self, token: Uuid) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.config.cookie_name.clone(), token.to_string());
        cookie.set_path("/");
        cookie.set_http_only(true);

        // SameSite=None is required for credentialed cross-origin requests
        // but browsers reject it without Secure.
        if self.config.cookie_secure {
            cookie.set_secure(true);
            cookie.set_same_site(SameSite::None);
        } else {
            cookie.set_same_site(SameSite::Lax);
        }

        cookie
    }

    /// Cookie matching the session cookie's name and path, for removal.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.config.cookie_name.clone(), "");
        cookie.set_path("/");
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(secure: bool) -> SessionService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/rainsafe_test")
            .unwrap();
        SessionService::new(
            pool,
            SessionConfig {
                cookie_name: "rainsafe_session".to_string(),
                cookie_secure: secure,
                ttl_secs: 3600,
            },
        )
    }

    #[tokio::test]
    async fn test_cookie_is_http_only_session_scoped() {
        let cookie = service(false).build_cookie(Uuid::new_v4());
        assert_eq!(cookie.name(), "rainsafe_session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_none());
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[tokio::test]
    async fn test_secure_cookie_uses_same_site_none() {
        let cookie = service(true).build_cookie(Uuid::new_v4());
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }
}
