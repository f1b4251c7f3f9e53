use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::dashboards::d500_visualization_embed::{parse_route_id, EmbedOptions};
use contracts::shared::query::Query;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::Spinner;

use super::visualization::EmbedVisualization;
use crate::shared::fault::use_fault_reporter;
use crate::shared::query::api;
use crate::system::auth::ApiCredentials;

fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Public embed of a single visualization
///
/// Route: `/embed/query/:query_id/visualization/:visualization_id`
#[component]
pub fn VisualizationEmbedPage() -> impl IntoView {
    let params = use_params_map();
    let faults = use_fault_reporter();

    let options = EmbedOptions::from_query_string(&location_search());
    let credentials = ApiCredentials::resolve(options.api_key.clone());
    provide_context(credentials.clone());

    let query_id = params.with_untracked(|p| p.get("query_id").and_then(|v| parse_route_id(&v)));
    let visualization_id = params
        .with_untracked(|p| p.get("visualization_id").and_then(|v| parse_route_id(&v)));

    if visualization_id.is_none() {
        faults.report("VisualizationEmbedPage", "Invalid visualization id");
    }

    let (query, set_query) = signal(None::<Query>);

    // Late responses after unmount are dropped
    let cancelled = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let cancelled = cancelled.clone();
        move || cancelled.store(true, Ordering::Relaxed)
    });

    match query_id {
        Some(id) => spawn_local(async move {
            let loaded = api::get_query(id, &credentials).await;
            if cancelled.load(Ordering::Relaxed) {
                log::debug!("[VisualizationEmbedPage] query {} loaded after unmount", id);
                return;
            }
            match loaded {
                Ok(q) => set_query.set(Some(q)),
                Err(e) => faults.report(
                    "VisualizationEmbedPage",
                    format!("Failed to load query {}: {}", id, e),
                ),
            }
        }),
        None => faults.report("VisualizationEmbedPage", "Invalid query id"),
    }

    view! {
        <div class="embed">
            {move || match (query.get(), visualization_id) {
                (None, _) => view! {
                    <div class="embed__loading">
                        <Spinner />
                    </div>
                }
                .into_any(),
                (Some(q), Some(vid)) => view! {
                    <EmbedVisualization query=q visualization_id=vid options=options.clone() />
                }
                .into_any(),
                (Some(_), None) => view! { <></> }.into_any(),
            }}
        </div>
    }
}
