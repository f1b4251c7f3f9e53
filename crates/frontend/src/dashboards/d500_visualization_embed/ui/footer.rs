use std::time::Duration;

use contracts::dashboards::d500_visualization_embed::EmbedOptions;
use contracts::shared::parameters::Parameter;
use contracts::shared::query::Query;
use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::prelude::*;

use crate::shared::components::DownloadDatasetMenu;
use crate::shared::date_utils::{format_age, format_datetime, format_timer, now};
use crate::shared::icons::icon;
use crate::shared::query::execution::QueryExecution;

/// Timestamp, link to the query and dataset download
#[component]
pub fn EmbedFooter(
    query: Query,
    /// Current parameters; downloads use their applied values
    parameters: RwSignal<Vec<Parameter>>,
    execution: QueryExecution,
    options: EmbedOptions,
) -> impl IntoView {
    let clock = RwSignal::new(now());
    match set_interval_with_handle(move || clock.set(now()), Duration::from_secs(1)) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!("[EmbedFooter] clock not started: {:?}", e),
    }

    let executing = execution.executing();
    let started_at = execution.started_at();
    let result = execution.result();

    let timestamp = move || {
        let current = clock.get();
        if executing.get() {
            let elapsed = started_at
                .get()
                .map(|start| (current - start).num_seconds())
                .unwrap_or_default();
            view! {
                <span class="embed__timestamp">
                    {icon("clock")}
                    {format!(" {}", format_timer(elapsed))}
                </span>
            }
            .into_any()
        } else if let Some(r) = result.get() {
            view! {
                <span class="embed__timestamp" title=format_datetime(&r.retrieved_at)>
                    {icon("clock")}
                    {format!(" Updated {}", format_age(&r.retrieved_at, &current))}
                </span>
            }
            .into_any()
        } else {
            view! { <></> }.into_any()
        }
    };

    let query_url = query.url();
    let query_signal = Signal::derive(move || {
        let mut current = query.clone();
        current.options.parameters = parameters.get();
        current
    });

    view! {
        <div class="embed__footer">
            <div class="embed__footer-left">
                {(!options.hide_timestamp).then(|| timestamp)}
            </div>
            {(!options.hide_link)
                .then(|| {
                    view! {
                        <div class="embed__footer-right">
                            <a class="button button--secondary button--small" href=query_url target="_blank">
                                {icon("external-link")}
                                " Open in Redash"
                            </a>
                            <DownloadDatasetMenu
                                query=query_signal
                                has_result=execution.has_data()
                            />
                        </div>
                    }
                })}
        </div>
    }
}
