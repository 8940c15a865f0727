pub mod auth_handler;

pub use auth_handler::{__path_auth_get, __path_auth_post, auth_get, auth_post};
