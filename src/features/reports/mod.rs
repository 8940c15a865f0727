//! Hazard report submission, listing, and hotspot ranking.
//!
//! | Method | Path                | Access        |
//! |--------|---------------------|---------------|
//! | GET    | `/reports`          | authenticated |
//! | POST   | `/reports`          | authenticated |
//! | GET    | `/reports/hotspots` | admin         |

pub mod dtos;
pub mod handlers;
pub mod hotspots;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
