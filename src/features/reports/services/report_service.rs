use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::activity_logs::services::ActivityLogService;
use crate::features::auth::models::SessionUser;
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{Report, ReportWithOwner, Severity};

/// Hazard report submission and listing.
pub struct ReportService {
    pool: PgPool,
    activity_logs: Arc<ActivityLogService>,
}

impl ReportService {
    pub fn new(pool: PgPool, activity_logs: Arc<ActivityLogService>) -> Self {
        Self {
            pool,
            activity_logs,
        }
    }

    /// Insert a report owned by the caller.
    ///
    /// Location, hazard type, and severity are required; description and
    /// reporter name are optional and stored as NULL when blank. All string
    /// fields are trimmed before validation so whitespace-only input counts
    /// as missing.
    pub async fn create(&self, user: &SessionUser, dto: CreateReportDto) -> Result<Report> {
        let location = dto.location.trim();
        let hazard_type = dto.hazard_type.trim();
        let severity_raw = dto.severity.trim();

        if location.is_empty() || hazard_type.is_empty() || severity_raw.is_empty() {
            return Err(AppError::Validation(
                "Location, hazard type, and severity are required.".to_string(),
            ));
        }

        let severity = Severity::from_str(severity_raw).map_err(|_| {
            AppError::Validation("Severity must be Low, Medium, or High.".to_string())
        })?;

        let description = non_empty(dto.description.trim());
        let reporter_name = non_empty(dto.reporter_name.trim());

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (id, user_id, location, hazard_type, severity, description, reporter_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, location, hazard_type, severity, description, reporter_name, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user.id)
        .bind(location)
        .bind(hazard_type)
        .bind(severity)
        .bind(description)
        .bind(reporter_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        if let Err(e) = self
            .activity_logs
            .record(user.id, "submitted_report", report_details(&report))
            .await
        {
            tracing::warn!("Failed to record report activity: {:?}", e);
        }

        Ok(report)
    }

    /// The caller's own reports, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, user_id, location, hazard_type, severity, description, reporter_name, created_at
            FROM reports
            WHERE user_id = $1
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }

    /// All reports across all users, newest first, with the owner's email
    /// joined in. Optional equality filters on severity and hazard type; an
    /// unknown severity value simply matches nothing.
    pub async fn list_all(
        &self,
        severity: Option<&str>,
        hazard_type: Option<&str>,
    ) -> Result<Vec<ReportWithOwner>> {
        let severity = severity.map(str::trim).filter(|s| !s.is_empty());
        let hazard_type = hazard_type.map(str::trim).filter(|s| !s.is_empty());

        sqlx::query_as::<_, ReportWithOwner>(
            r#"
            SELECT
                r.id,
                r.user_id,
                u.email AS user_email,
                r.location,
                r.hazard_type,
                r.severity,
                r.description,
                r.reporter_name,
                r.created_at
            FROM reports r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE ($1::text IS NULL OR r.severity::text = $1)
              AND ($2::text IS NULL OR r.hazard_type = $2)
            ORDER BY r.created_at DESC, r.id ASC
            "#,
        )
        .bind(severity)
        .bind(hazard_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list all reports: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Every report, unfiltered, for hotspot aggregation.
    pub async fn list_all_unfiltered(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, user_id, location, hazard_type, severity, description, reporter_name, created_at
            FROM reports
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load reports for hotspots: {:?}", e);
            AppError::Database(e)
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn report_details(report: &Report) -> String {
    format!(
        "Reported \"{}\" ({}) at \"{}\".",
        report.hazard_type, report.severity, report.location
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_report_details_wording() {
        let report = Report {
            id: Uuid::now_v7(),
            user_id: Uuid::new_v4(),
            location: "Riverside Ward".to_string(),
            hazard_type: "Flood".to_string(),
            severity: Severity::High,
            description: None,
            reporter_name: None,
            created_at: Utc::now(),
        };

        assert_eq!(
            report_details(&report),
            "Reported \"Flood\" (High) at \"Riverside Ward\"."
        );
    }

    #[test]
    fn test_non_empty_filters_blank() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x"), Some("x"));
    }
}
