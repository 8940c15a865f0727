use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for one audit-trail row. Append-only; rows are never
/// updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row: the acting user's email is joined in for display and
/// may be absent if the user record was removed.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogWithEmail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: Option<String>,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}
