use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportWithOwner, Severity};

/// Request body for submitting a report. Every field defaults to an empty
/// string so an absent or malformed body fails the required-fields check
/// instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[serde(default)]
    #[validate(length(max = 255, message = "Location must not exceed 255 characters."))]
    pub location: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Hazard type must not exceed 255 characters."))]
    pub hazard_type: String,

    /// One of "Low", "Medium", "High"
    #[serde(default)]
    pub severity: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters."))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Reporter name must not exceed 255 characters."))]
    pub reporter_name: String,
}

/// Query string for `GET /reports`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// "user" (default) for the caller's own rows, "admin" for all rows
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Admin scope only: equality filter on severity
    pub severity: Option<String>,
    /// Admin scope only: equality filter on hazard type
    pub hazard_type: Option<String>,
}

fn default_scope() -> String {
    "user".to_string()
}

/// One report as returned to clients. `user_email` is only present in
/// admin listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportDto {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub location: String,
    pub hazard_type: String,
    pub severity: Severity,
    pub description: Option<String>,
    pub reporter_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response body: `{reports: [...]}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportsResponse {
    pub reports: Vec<ReportDto>,
}

impl From<Report> for ReportDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            user_email: None,
            location: r.location,
            hazard_type: r.hazard_type,
            severity: r.severity,
            description: r.description,
            reporter_name: r.reporter_name,
            created_at: r.created_at,
        }
    }
}

impl From<ReportWithOwner> for ReportDto {
    fn from(r: ReportWithOwner) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            user_email: r.user_email,
            location: r.location,
            hazard_type: r.hazard_type,
            severity: r.severity,
            description: r.description,
            reporter_name: r.reporter_name,
            created_at: r.created_at,
        }
    }
}
