//! Geographic cascade: zone → region → depot
//!
//! The depot mapping is grouped once into a `FilterCache` at startup; selectors
//! resolve their options from it based on the effective values of their
//! upstream parameters.

pub mod cache;
pub mod cascade;
pub mod rows;

pub use cache::FilterCache;
pub use cascade::*;
pub use rows::*;
