use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature.
///
/// All routes require an authenticated session; the hotspot ranking is
/// admin-only.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/reports/hotspots", get(handlers::list_hotspots))
        .with_state(service)
}
