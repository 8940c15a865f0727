use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::activity_logs::dtos::{ActivityLogDto, ListLogsQuery, LogsResponse};
use crate::features::activity_logs::services::ActivityLogService;
use crate::features::auth::guards::require_role;
use crate::features::auth::models::SessionUser;
use crate::shared::constants::ROLE_ADMIN;
use crate::shared::types::ErrorBody;

/// List activity logs for the caller, or all logs for admins
#[utoipa::path(
    get,
    path = "/activity_logs",
    params(ListLogsQuery),
    responses(
        (status = 200, description = "Activity logs, newest first", body = LogsResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin scope requested without admin role", body = ErrorBody)
    ),
    tag = "activity_logs",
    security(("session_cookie" = []))
)]
pub async fn list_logs(
    user: SessionUser,
    State(service): State<Arc<ActivityLogService>>,
    Query(query): Query<ListLogsQuery>,
) -> Result<Json<LogsResponse>> {
    let logs: Vec<ActivityLogDto> = if query.scope == "admin" {
        require_role(&user, ROLE_ADMIN)?;
        service
            .list_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect()
    } else {
        service
            .list_for_user(user.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect()
    };

    Ok(Json(LogsResponse { logs }))
}
