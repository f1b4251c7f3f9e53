//! Parameter inputs and the filter cache context

pub mod ui;

use std::sync::Arc;

use contracts::shared::geo_filter::{builtin_mapping, FilterCache};
use leptos::prelude::*;

/// Builds the zone / region / depot cache once and makes it available to
/// cascading selectors
pub fn provide_filter_cache() {
    let (rows, errors) = builtin_mapping().into_rows();
    if let Some(errors) = errors {
        log::warn!("Depot mapping reported errors: {}", errors);
    }
    let cache = FilterCache::build(&rows);
    log::info!("Filter cache ready: {} zones", cache.zones().len());
    provide_context(Arc::new(cache));
}

pub fn use_filter_cache() -> Arc<FilterCache> {
    use_context::<Arc<FilterCache>>().expect("FilterCache not provided")
}
