//! Per-location report aggregation for admin triage.
//!
//! Pure and I/O-free: the handler loads the rows, this module only groups
//! and ranks them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::features::reports::models::{Report, Severity};
use crate::shared::constants::{HOTSPOT_LIMIT, UNKNOWN_LOCATION};

/// One location group, ranked by report frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Hotspot {
    pub location: String,
    pub report_count: usize,
    pub most_recent_severity: Severity,
    pub last_reported: DateTime<Utc>,
}

/// Response body: `{hotspots: [...]}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HotspotsResponse {
    pub hotspots: Vec<Hotspot>,
}

/// Group reports by trimmed location (case-sensitive; blank locations fall
/// under the "Unknown location" sentinel), rank by report count descending,
/// and keep the top ten.
///
/// Each group carries the severity and timestamp of its most recent report;
/// timestamp ties are broken by the larger id so the result is
/// deterministic. Count ties preserve the order locations were first
/// encountered in the input.
pub fn aggregate(reports: &[Report]) -> Vec<Hotspot> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (usize, &Report)> = HashMap::new();

    for report in reports {
        let key = match report.location.trim() {
            "" => UNKNOWN_LOCATION,
            trimmed => trimmed,
        };

        match groups.get_mut(key) {
            Some((count, latest)) => {
                *count += 1;
                if (report.created_at, report.id) > (latest.created_at, latest.id) {
                    *latest = report;
                }
            }
            None => {
                order.push(key);
                groups.insert(key, (1, report));
            }
        }
    }

    let mut hotspots: Vec<Hotspot> = order
        .into_iter()
        .map(|key| {
            let (count, latest) = groups[key];
            Hotspot {
                location: key.to_string(),
                report_count: count,
                most_recent_severity: latest.severity,
                last_reported: latest.created_at,
            }
        })
        .collect();

    hotspots.sort_by(|a, b| b.report_count.cmp(&a.report_count));
    hotspots.truncate(HOTSPOT_LIMIT);
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn report(location: &str, severity: Severity, at: DateTime<Utc>) -> Report {
        Report {
            id: Uuid::now_v7(),
            user_id: Uuid::new_v4(),
            location: location.to_string(),
            hazard_type: "Flood".to_string(),
            severity,
            description: None,
            reporter_name: None,
            created_at: at,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_groups_by_count_with_most_recent_severity() {
        let reports = vec![
            report("A", Severity::Low, at(1)),
            report("A", Severity::High, at(3)),
            report("B", Severity::Medium, at(2)),
        ];

        let hotspots = aggregate(&reports);

        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].location, "A");
        assert_eq!(hotspots[0].report_count, 2);
        assert_eq!(hotspots[0].most_recent_severity, Severity::High);
        assert_eq!(hotspots[0].last_reported, at(3));
        assert_eq!(hotspots[1].location, "B");
        assert_eq!(hotspots[1].report_count, 1);
        assert_eq!(hotspots[1].last_reported, at(2));
    }

    #[test]
    fn test_blank_locations_group_under_sentinel() {
        let reports = vec![
            report("", Severity::Low, at(1)),
            report("   ", Severity::High, at(2)),
            report("Dockside", Severity::Medium, at(3)),
        ];

        let hotspots = aggregate(&reports);

        assert_eq!(hotspots[0].location, UNKNOWN_LOCATION);
        assert_eq!(hotspots[0].report_count, 2);
        assert_eq!(hotspots[0].most_recent_severity, Severity::High);
    }

    #[test]
    fn test_locations_are_trimmed_and_case_sensitive() {
        let reports = vec![
            report("  Old Mill ", Severity::Low, at(1)),
            report("Old Mill", Severity::Medium, at(2)),
            report("old mill", Severity::High, at(3)),
        ];

        let hotspots = aggregate(&reports);

        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].location, "Old Mill");
        assert_eq!(hotspots[0].report_count, 2);
        assert_eq!(hotspots[1].location, "old mill");
    }

    #[test]
    fn test_count_ties_preserve_first_encountered_order() {
        let reports = vec![
            report("C", Severity::Low, at(1)),
            report("A", Severity::Low, at(2)),
            report("B", Severity::Low, at(3)),
        ];

        let hotspots = aggregate(&reports);

        let order: Vec<&str> = hotspots.iter().map(|h| h.location.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }

    #[test]
    fn test_truncates_to_top_ten() {
        let mut reports = Vec::new();
        for i in 0..15 {
            let loc = format!("L{i}");
            // L0 gets the most reports, L14 the fewest
            for _ in 0..(15 - i) {
                reports.push(report(&loc, Severity::Low, at(i as i64)));
            }
        }

        let hotspots = aggregate(&reports);

        assert_eq!(hotspots.len(), HOTSPOT_LIMIT);
        assert_eq!(hotspots[0].location, "L0");
        assert_eq!(hotspots[9].location, "L9");
    }

    #[test]
    fn test_timestamp_tie_resolves_by_id() {
        let mut small_id = report("A", Severity::Low, at(5));
        small_id.id = Uuid::from_u128(1);
        let mut large_id = report("A", Severity::High, at(5));
        large_id.id = Uuid::from_u128(2);

        // input order must not matter, only the id
        let hotspots = aggregate(&[large_id, small_id]);

        assert_eq!(hotspots[0].most_recent_severity, Severity::High);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }
}
