use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::activity_logs::models::{ActivityLog, ActivityLogWithEmail};
use crate::shared::constants::{ADMIN_LOG_LIMIT, USER_LOG_LIMIT};

/// Service for the append-only audit trail.
///
/// `record` is invoked by other services after a state change. It returns a
/// `Result` so that call sites can log a failure, but callers must never
/// propagate it: the audit trail is best-effort, not transactional with the
/// primary write.
pub struct ActivityLogService {
    pool: PgPool,
}

impl ActivityLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one audit row.
    pub async fn record(&self, user_id: Uuid, action: &str, details: String) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (user_id, action, details)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    /// The caller's own logs, newest first, capped at 100 rows.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityLog>> {
        sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT id, user_id, action, details, created_at
            FROM activity_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(USER_LOG_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list activity logs: {:?}", e);
            AppError::Database(e)
        })
    }

    /// All logs across all users, newest first, capped at 200 rows, with
    /// the acting user's email joined in for display.
    pub async fn list_all(&self) -> Result<Vec<ActivityLogWithEmail>> {
        sqlx::query_as::<_, ActivityLogWithEmail>(
            r#"
            SELECT
                al.id,
                al.user_id,
                u.email AS user_email,
                al.action,
                al.details,
                al.created_at
            FROM activity_logs al
            LEFT JOIN users u ON u.id = al.user_id
            ORDER BY al.created_at DESC, al.id ASC
            LIMIT $1
            "#,
        )
        .bind(ADMIN_LOG_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list all activity logs: {:?}", e);
            AppError::Database(e)
        })
    }
}
