//! Session-based authentication: signup, login, logout, session check.
//!
//! The session is a server-side row keyed by an opaque cookie token; see
//! [`services::SessionService`]. Role checks live in [`guards`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/auth?action=signup` | No | Register a new account |
//! | POST | `/auth?action=login` | No | Verify credentials, open a session |
//! | POST | `/auth?action=logout` | No | Destroy the current session |
//! | GET | `/auth?action=session` | No | Current session user or null |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AuthService, SessionService};
