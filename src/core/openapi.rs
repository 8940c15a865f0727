use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::activity_logs::{dtos as activity_log_dtos, handlers as activity_log_handlers};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::reports::{
    dtos as report_dtos, handlers as report_handlers, hotspots, models as report_models,
};
use crate::shared::types::{ErrorBody, MessageBody};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::auth_get,
        auth_handlers::auth_post,
        // Reports
        report_handlers::list_reports,
        report_handlers::create_report,
        report_handlers::list_hotspots,
        // Activity logs
        activity_log_handlers::list_logs,
    ),
    components(
        schemas(
            ErrorBody,
            MessageBody,
            auth_dtos::CredentialsDto,
            auth_dtos::LoginResponse,
            auth_dtos::SessionResponse,
            report_dtos::CreateReportDto,
            report_dtos::ReportDto,
            report_dtos::ReportsResponse,
            report_models::Severity,
            hotspots::Hotspot,
            hotspots::HotspotsResponse,
            activity_log_dtos::ActivityLogDto,
            activity_log_dtos::LogsResponse,
        )
    ),
    tags(
        (name = "auth", description = "Session-based authentication"),
        (name = "reports", description = "Hazard reports and hotspot ranking"),
        (name = "activity_logs", description = "Append-only activity trail"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "RainSafe API",
        version = "0.1.0",
        description = "API documentation for RainSafe",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("rainsafe_session"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
