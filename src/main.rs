mod core;
mod features;
mod shared;

use std::sync::Arc;

use axum::{middleware::from_fn, Json, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::activity_logs::{routes as activity_log_routes, ActivityLogService};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, SessionService};
use crate::features::reports::{routes as report_routes, ReportService};
use crate::shared::types::ErrorBody;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(build_router(pool, &config))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire the API routes: the session middleware resolves the cookie for
/// every route, individual extractors then enforce authentication.
fn build_router(pool: sqlx::PgPool, config: &Config) -> Router {
    let activity_log_service = Arc::new(ActivityLogService::new(pool.clone()));
    let session_service = Arc::new(SessionService::new(pool.clone(), config.session.clone()));
    let auth_service = Arc::new(AuthService::new(
        pool.clone(),
        Arc::clone(&session_service),
        Arc::clone(&activity_log_service),
    ));
    let report_service = Arc::new(ReportService::new(
        pool,
        Arc::clone(&activity_log_service),
    ));

    Router::new()
        .merge(auth_routes::routes(auth_service))
        .merge(report_routes::routes(report_service))
        .merge(activity_log_routes::routes(activity_log_service))
        .layer(axum::middleware::from_fn_with_state(
            session_service,
            middleware::session_middleware,
        ))
        .fallback(fallback_not_found)
}

async fn fallback_not_found() -> (axum::http::StatusCode, Json<ErrorBody>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found.".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;

    use crate::core::config::{AppConfig, DatabaseConfig, SessionConfig, SwaggerConfig};
    use crate::features::auth::models::UserRole;
    use crate::shared::test_helpers::{session_for, with_session};

    fn test_config() -> Config {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgres://localhost/rainsafe_test".to_string(),
                max_connections: 1,
                min_connections: 0,
                acquire_timeout_secs: 1,
                idle_timeout_secs: 60,
                max_lifetime_secs: 60,
            },
            session: SessionConfig {
                cookie_name: "rainsafe_session".to_string(),
                cookie_secure: false,
                ttl_secs: 3600,
            },
            swagger: SwaggerConfig {
                username: None,
                password: None,
                title: "RainSafe API".to_string(),
                version: "0.1.0".to_string(),
                description: "API documentation for RainSafe".to_string(),
            },
        }
    }

    /// Router over a lazy pool: routes that reject before touching the
    /// database are testable without one.
    fn test_router() -> Router {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        build_router(pool, &config)
    }

    fn test_router_with_role(role: UserRole) -> Router {
        with_session(test_router(), session_for(role))
    }

    #[tokio::test]
    async fn test_session_check_without_session_returns_null_user() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.get("/auth").add_query_param("action", "session").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "user": null }));
    }

    #[tokio::test]
    async fn test_unknown_auth_action_is_not_found() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.post("/auth").add_query_param("action", "refresh").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], "Not found.");
    }

    #[tokio::test]
    async fn test_signup_with_empty_body_requires_fields() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.post("/auth").add_query_param("action", "signup").await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Email and password are required."
        );
    }

    #[tokio::test]
    async fn test_signup_with_short_password_is_rejected() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server
            .post("/auth")
            .add_query_param("action", "signup")
            .json(&json!({ "email": "ana@example.com", "password": "12345" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Password must be at least 6 characters."
        );
    }

    #[tokio::test]
    async fn test_reports_require_authentication() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.get("/reports").await;

        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["error"], "Not authenticated.");
    }

    #[tokio::test]
    async fn test_admin_report_scope_is_forbidden_for_users() {
        let server = TestServer::new(test_router_with_role(UserRole::User)).unwrap();

        let response = server.get("/reports").add_query_param("scope", "admin").await;

        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["error"], "Forbidden.");
    }

    #[tokio::test]
    async fn test_admin_log_scope_is_forbidden_for_users() {
        let server = TestServer::new(test_router_with_role(UserRole::User)).unwrap();

        let response = server
            .get("/activity_logs")
            .add_query_param("scope", "admin")
            .await;

        response.assert_status_forbidden();
        assert_eq!(response.json::<Value>()["error"], "Forbidden.");
    }

    #[tokio::test]
    async fn test_hotspots_are_admin_only() {
        let server = TestServer::new(test_router_with_role(UserRole::User)).unwrap();

        let response = server.get("/reports/hotspots").await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_report_submission_requires_hazard_fields() {
        let server = TestServer::new(test_router_with_role(UserRole::User)).unwrap();

        let response = server
            .post("/reports")
            .json(&json!({ "location": "Dockside", "hazard_type": "", "severity": "High" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Location, hazard type, and severity are required."
        );
    }

    #[tokio::test]
    async fn test_report_submission_rejects_unknown_severity() {
        let server = TestServer::new(test_router_with_role(UserRole::User)).unwrap();

        let response = server
            .post("/reports")
            .json(&json!({ "location": "Dockside", "hazard_type": "Flood", "severity": "severe" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Severity must be Low, Medium, or High."
        );
    }

    #[tokio::test]
    async fn test_unmatched_route_returns_json_not_found() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.get("/nope").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>(), json!({ "error": "Not found." }));
    }
}
