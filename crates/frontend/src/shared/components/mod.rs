pub mod download_menu;
pub mod query_control_dropdown;
pub mod result_table;

pub use download_menu::{DownloadDatasetMenu, DownloadState};
pub use query_control_dropdown::QueryControlDropdown;
pub use result_table::ResultTable;
