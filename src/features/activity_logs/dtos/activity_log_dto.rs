use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::activity_logs::models::{ActivityLog, ActivityLogWithEmail};

/// Query string for `/activity_logs`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListLogsQuery {
    /// "user" (default) for the caller's own rows, "admin" for all rows
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "user".to_string()
}

/// One activity-log row as returned to clients. `user_email` is only
/// present in admin listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityLogDto {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Response body: `{logs: [...]}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogsResponse {
    pub logs: Vec<ActivityLogDto>,
}

impl From<ActivityLog> for ActivityLogDto {
    fn from(l: ActivityLog) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            user_email: None,
            action: l.action,
            details: l.details,
            created_at: l.created_at,
        }
    }
}

impl From<ActivityLogWithEmail> for ActivityLogDto {
    fn from(l: ActivityLogWithEmail) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            user_email: l.user_email,
            action: l.action,
            details: l.details,
            created_at: l.created_at,
        }
    }
}
