use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::{require_role, RequireAdmin};
use crate::features::auth::models::SessionUser;
use crate::features::reports::dtos::{
    CreateReportDto, ListReportsQuery, ReportDto, ReportsResponse,
};
use crate::features::reports::hotspots::{self, HotspotsResponse};
use crate::features::reports::services::ReportService;
use crate::shared::constants::ROLE_ADMIN;
use crate::shared::types::{ErrorBody, MessageBody};

/// List reports for the caller, or all reports for admins
#[utoipa::path(
    get,
    path = "/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Reports, newest first", body = ReportsResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin scope requested without admin role", body = ErrorBody)
    ),
    tag = "reports",
    security(("session_cookie" = []))
)]
pub async fn list_reports(
    user: SessionUser,
    State(service): State<Arc<ReportService>>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ReportsResponse>> {
    let reports: Vec<ReportDto> = if query.scope == "admin" {
        require_role(&user, ROLE_ADMIN)?;
        service
            .list_all(query.severity.as_deref(), query.hazard_type.as_deref())
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

    Ok(Json(ReportsResponse { reports }))
}

/// Submit a hazard report
#[utoipa::path(
    post,
    path = "/reports",
    request_body = CreateReportDto,
    responses(
        (status = 200, description = "Report stored", body = MessageBody),
        (status = 400, description = "Missing or invalid input", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    tag = "reports",
    security(("session_cookie" = []))
)]
pub async fn create_report(
    user: SessionUser,
    State(service): State<Arc<ReportService>>,
    body: Bytes,
) -> Result<Json<MessageBody>> {
    let dto = parse_report(&body);
    dto.validate()
        .map_err(|e| AppError::Validation(first_message(e)))?;

    service.create(&user, dto).await?;

    Ok(Json(MessageBody::new("Report submitted successfully.")))
}

/// Rank locations by report frequency
#[utoipa::path(
    get,
    path = "/reports/hotspots",
    responses(
        (status = 200, description = "Top locations by report count", body = HotspotsResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody)
    ),
    tag = "reports",
    security(("session_cookie" = []))
)]
pub async fn list_hotspots(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<HotspotsResponse>> {
    let reports = service.list_all_unfiltered().await?;

    Ok(Json(HotspotsResponse {
        hotspots: hotspots::aggregate(&reports),
    }))
}

/// Lenient body parse: an absent or malformed JSON body degrades to empty
/// fields, which then fail the required-fields check.
fn parse_report(body: &[u8]) -> CreateReportDto {
    if body.is_empty() {
        return CreateReportDto::default();
    }

    serde_json::from_slice(body).unwrap_or_default()
}

fn first_message(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_empty_body() {
        let dto = parse_report(b"");
        assert!(dto.location.is_empty());
        assert!(dto.hazard_type.is_empty());
        assert!(dto.severity.is_empty());
    }

    #[test]
    fn test_parse_report_malformed_json_degrades_to_empty() {
        let dto = parse_report(b"{broken");
        assert!(dto.location.is_empty());
    }

    #[test]
    fn test_parse_report_ignores_unknown_fields() {
        let dto = parse_report(
            br#"{"location": "Dockside", "hazard_type": "Flood", "severity": "High", "extra": 1}"#,
        );
        assert_eq!(dto.location, "Dockside");
        assert_eq!(dto.hazard_type, "Flood");
        assert_eq!(dto.severity, "High");
    }
}
