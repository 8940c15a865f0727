use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Report severity. Stored as a Postgres enum; the wire values are the
/// capitalized names ("Low", "Medium", "High"), matched case-sensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "severity")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Severity::Low),
            "Medium" => Ok(Severity::Medium),
            "High" => Ok(Severity::High),
            _ => Err(()),
        }
    }
}

/// Database model for a hazard report. Rows are immutable once inserted and
/// never deleted.
///
/// Ids are UUID v7 so that ordering by `(created_at DESC, id ASC)` breaks
/// timestamp ties in insertion order.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub location: String,
    pub hazard_type: String,
    pub severity: Severity,
    pub description: Option<String>,
    pub reporter_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row: the owner's email is joined in for display.
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithOwner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: Option<String>,
    pub location: String,
    pub hazard_type: String,
    pub severity: Severity,
    pub description: Option<String>,
    pub reporter_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_is_case_sensitive() {
        assert_eq!("Low".parse::<Severity>(), Ok(Severity::Low));
        assert_eq!("Medium".parse::<Severity>(), Ok(Severity::Medium));
        assert_eq!("High".parse::<Severity>(), Ok(Severity::High));
        assert!("low".parse::<Severity>().is_err());
        assert!("HIGH".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }
}
