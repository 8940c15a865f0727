mod report;

pub use report::{Report, ReportWithOwner, Severity};
