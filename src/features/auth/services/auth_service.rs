use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_extra::extract::cookie::Cookie;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::activity_logs::services::ActivityLogService;
use crate::features::auth::dtos::CredentialsDto;
use crate::features::auth::models::{SessionContext, SessionUser, User, UserRole};
use crate::features::auth::services::SessionService;
use crate::shared::types::MessageBody;

/// Service for account creation and session lifecycle.
pub struct AuthService {
    pool: PgPool,
    sessions: Arc<SessionService>,
    activity_logs: Arc<ActivityLogService>,
}

impl AuthService {
    pub fn new(
        pool: PgPool,
        sessions: Arc<SessionService>,
        activity_logs: Arc<ActivityLogService>,
    ) -> Self {
        Self {
            pool,
            sessions,
            activity_logs,
        }
    }

    /// Register a new account. Does not log the user in.
    pub async fn signup(&self, credentials: CredentialsDto) -> Result<MessageBody> {
        let email = credentials.email.trim().to_string();
        let password = credentials.password;

        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        if password.len() < 6 {
            return Err(AppError::Validation(
                "Password must be at least 6 characters.".to_string(),
            ));
        }

        let existing: Option<(uuid::Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = $1 LIMIT 1")
                .bind(&email)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if existing.is_some() {
            return Err(AppError::Conflict(
                "Email is already registered.".to_string(),
            ));
        }

        let password_hash = hash_password(password).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(UserRole::User)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Account created: id={}, email={}", user.id, user.email);

        if let Err(e) = self
            .activity_logs
            .record(user.id, "signup", signup_details(&user.email))
            .await
        {
            tracing::warn!("Activity log failed for signup: {:?}", e);
        }

        Ok(MessageBody::new("Account created. You can now sign in."))
    }

    /// Verify credentials and open a session. The error never distinguishes
    /// an unknown email from a wrong password.
    pub async fn login(
        &self,
        credentials: CredentialsDto,
    ) -> Result<(SessionUser, Cookie<'static>)> {
        let email = credentials.email.trim().to_string();
        let password = credentials.password;

        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Auth("Invalid email or password.".to_string()))?;

        if !verify_password(password, user.password_hash.clone()).await? {
            return Err(AppError::Auth("Invalid email or password.".to_string()));
        }

        // Stale rows are swept here instead of by a background task.
        if let Err(e) = self.sessions.delete_expired().await {
            tracing::warn!("Expired session sweep failed: {:?}", e);
        }

        let (context, cookie) = self.sessions.create(&user).await?;

        if let Err(e) = self
            .activity_logs
            .record(user.id, "login", login_details(&context.user))
            .await
        {
            tracing::warn!("Activity log failed for login: {:?}", e);
        }

        Ok((context.user, cookie))
    }

    /// Tear down the caller's session if one exists. Always succeeds from
    /// the client's point of view.
    pub async fn logout(&self, context: Option<SessionContext>) -> Result<Cookie<'static>> {
        if let Some(context) = context {
            if let Err(e) = self
                .activity_logs
                .record(context.user.id, "logout", logout_details(&context.user))
                .await
            {
                tracing::warn!("Activity log failed for logout: {:?}", e);
            }

            self.sessions.destroy(context.token).await?;
        }

        Ok(self.sessions.removal_cookie())
    }
}

fn signup_details(email: &str) -> String {
    format!("Created account: {}", email)
}

fn login_details(user: &SessionUser) -> String {
    format!("User {} ({}) signed in.", user.email, user.role.as_str())
}

fn logout_details(user: &SessionUser) -> String {
    format!("User {} ({}) signed out.", user.email, user.role.as_str())
}

/// Argon2 hashing is CPU-bound, so it runs on the blocking pool.
async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|_| AppError::Internal("Password hashing task panicked".to_string()))?
    .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)?;
        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)?;
        Ok::<_, argon2::password_hash::Error>(())
    })
    .await
    .map(|outcome| outcome.is_ok())
    .map_err(|_| AppError::Internal("Password verification task panicked".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: UserRole) -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_activity_details_wording() {
        assert_eq!(
            signup_details("ana@example.com"),
            "Created account: ana@example.com"
        );
        assert_eq!(
            login_details(&user(UserRole::User)),
            "User ana@example.com (user) signed in."
        );
        assert_eq!(
            logout_details(&user(UserRole::Admin)),
            "User ana@example.com (admin) signed out."
        );
    }

    #[tokio::test]
    async fn test_hash_then_verify_round_trip() {
        let hash = hash_password("secret-password".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret-password".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong-password".to_string(), hash)
            .await
            .unwrap());
    }
}
