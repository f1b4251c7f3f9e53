use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::dashboards::d500_visualization_embed::parse_route_id;
use contracts::shared::parameters::execution_values;
use contracts::shared::query::Query;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::{Button, ButtonAppearance, Spinner};

use super::embed_panel::EmbedPanel;
use crate::shared::components::{QueryControlDropdown, ResultTable};
use crate::shared::fault::use_fault_reporter;
use crate::shared::icons::icon;
use crate::shared::parameters::ui::ParametersPanel;
use crate::shared::query::api;
use crate::shared::query::execution::QueryExecution;
use crate::system::auth::ApiCredentials;

/// Query page for signed-in users
///
/// Route: `/queries/:query_id`
#[component]
pub fn QueryViewPage() -> impl IntoView {
    let params = use_params_map();
    let faults = use_fault_reporter();

    let credentials = ApiCredentials::resolve(None);
    provide_context(credentials.clone());

    let (query, set_query) = signal(None::<Query>);
    let cancelled = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let cancelled = cancelled.clone();
        move || cancelled.store(true, Ordering::Relaxed)
    });

    match params.with_untracked(|p| p.get("query_id").and_then(|v| parse_route_id(&v))) {
        Some(id) => spawn_local(async move {
            let loaded = api::get_query(id, &credentials).await;
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            match loaded {
                Ok(q) => set_query.set(Some(q)),
                Err(e) => faults.report("QueryViewPage", format!("Failed to load query {}: {}", id, e)),
            }
        }),
        None => faults.report("QueryViewPage", "Invalid query id"),
    }

    view! {
        <div class="page">
            {move || match query.get() {
                Some(q) => view! { <QueryView query=q /> }.into_any(),
                None => view! { <Spinner /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn QueryView(query: Query) -> impl IntoView {
    let credentials = use_context::<ApiCredentials>().unwrap_or_default();
    let execution = QueryExecution::new(credentials);
    let parameters = RwSignal::new(query.parameters().to_vec());
    let query_id = query.id;
    let has_parameters = query.has_parameters();
    let title = query.name.clone();
    let query_signal = Signal::derive(move || {
        let mut current = query.clone();
        current.options.parameters = parameters.get();
        current
    });
    let show_embed = RwSignal::new(false);

    let refresh = move || {
        let values = parameters.with_untracked(|ps| execution_values(ps));
        execution.refresh(query_id, values);
    };
    refresh();

    let executing = execution.executing();
    let error = execution.error();
    let result = execution.result();

    view! {
        <div class="page-header">
            <div class="page-header__content">
                <h1 class="page-header__title">{title}</h1>
            </div>
            <div class="page-header__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=executing
                    on_click=move |_| refresh()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <QueryControlDropdown
                    query=query_signal
                    query_result=result
                    query_executing=executing
                    on_embed=Callback::new(move |_| show_embed.update(|s| *s = !*s))
                />
            </div>
        </div>

        <Show when=move || show_embed.get()>
            <EmbedPanel query=query_signal on_close=Callback::new(move |_| show_embed.set(false)) />
        </Show>

        {has_parameters
            .then(|| {
                view! {
                    <ParametersPanel
                        parameters=parameters
                        on_values_change=Callback::new(move |_| refresh())
                    />
                }
            })}

        <div class="page__content">
            {move || error.get().map(|message| view! { <div class="alert alert--error">{message}</div> })}
            <Show when=move || executing.get()>
                <div class="page__executing">
                    <Spinner />
                    <span>"Executing query..."</span>
                </div>
            </Show>
            {move || result.get().map(|r| view! { <ResultTable result=r /> })}
        </div>
    }
}
