use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::Utc;
use uuid::Uuid;

use crate::features::auth::models::{SessionContext, SessionUser, UserRole};

#[allow(dead_code)]
pub fn session_for(role: UserRole) -> SessionContext {
    SessionContext {
        token: Uuid::new_v4(),
        user: SessionUser {
            id: Uuid::new_v4(),
            email: match role {
                UserRole::Admin => "admin@example.com".to_string(),
                UserRole::User => "user@example.com".to_string(),
            },
            role,
            created_at: Utc::now(),
        },
    }
}

/// Wrap a router so every request carries the given session, standing in
/// for the cookie-resolving middleware.
#[allow(dead_code)]
pub fn with_session(router: Router, context: SessionContext) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let context = context.clone();
            async move {
                request.extensions_mut().insert(context);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
