pub mod activity_log_handler;

pub use activity_log_handler::{__path_list_logs, list_logs};
