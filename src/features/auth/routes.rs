use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Create routes for the auth feature.
///
/// One path carries all four operations, dispatched on `?action=`:
/// `GET /auth?action=session` and `POST /auth?action=signup|login|logout`.
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/auth", get(handlers::auth_get).post(handlers::auth_post))
        .with_state(service)
}
