pub mod download;
pub mod geo_filter;
pub mod parameters;
pub mod query;
