use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::activity_logs::handlers;
use crate::features::activity_logs::services::ActivityLogService;

/// Create routes for the activity logs feature
pub fn routes(service: Arc<ActivityLogService>) -> Router {
    Router::new()
        .route("/activity_logs", get(handlers::list_logs))
        .with_state(service)
}
