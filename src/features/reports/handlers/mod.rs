pub mod report_handler;

pub use report_handler::{
    __path_create_report, __path_list_hotspots, __path_list_reports, create_report, list_hotspots,
    list_reports,
};
