//! Query service client
//!
//! - `api` - query definition, execution (with job polling), dropdown values
//! - `execution` - reactive execution state shared by the query pages

pub mod api;
pub mod execution;
