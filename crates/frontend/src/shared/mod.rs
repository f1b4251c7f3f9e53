pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod fault;
pub mod icons;
pub mod markdown;
pub mod parameters;
pub mod query;
