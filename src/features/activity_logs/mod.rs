//! Append-only audit trail of account and report actions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/activity_logs?scope=user` | Session | Caller's own logs (max 100) |
//! | GET | `/activity_logs?scope=admin` | Admin | All logs with user emails (max 200) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ActivityLogService;
