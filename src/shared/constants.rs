// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can list all reports, logs, and hotspots
pub const ROLE_ADMIN: &str = "admin";

/// Default role assigned at signup
pub const ROLE_USER: &str = "user";

// =============================================================================
// LISTING CAPS
// =============================================================================

/// Maximum activity-log rows returned for a user's own listing
pub const USER_LOG_LIMIT: i64 = 100;

/// Maximum activity-log rows returned for the admin listing
pub const ADMIN_LOG_LIMIT: i64 = 200;

/// Maximum number of hotspot groups returned
pub const HOTSPOT_LIMIT: usize = 10;

/// Group key used for reports whose location is empty or whitespace
pub const UNKNOWN_LOCATION: &str = "Unknown location";
