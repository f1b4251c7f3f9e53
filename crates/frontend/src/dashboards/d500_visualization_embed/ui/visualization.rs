use contracts::dashboards::d500_visualization_embed::EmbedOptions;
use contracts::shared::parameters::execution_values;
use contracts::shared::query::Query;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::Spinner;

use super::footer::EmbedFooter;
use super::header::EmbedHeader;
use crate::shared::components::ResultTable;
use crate::shared::fault::use_fault_reporter;
use crate::shared::parameters::ui::ParametersPanel;
use crate::shared::query::execution::QueryExecution;
use crate::system::auth::ApiCredentials;

/// Visualization of a loaded query with parameters, result and footer
#[component]
pub fn EmbedVisualization(query: Query, visualization_id: i64, options: EmbedOptions) -> impl IntoView {
    let faults = use_fault_reporter();

    let Some(visualization) = query.find_visualization(visualization_id).cloned() else {
        // reported after the current render pass
        spawn_local(async move {
            TimeoutFuture::new(10).await;
            faults.report("EmbedVisualization", "Visualization does not exist");
        });
        return view! { <></> }.into_any();
    };

    let credentials = use_context::<ApiCredentials>().unwrap_or_default();
    let execution = QueryExecution::new(credentials);
    let parameters = RwSignal::new(query.parameters().to_vec());
    let query_id = query.id;

    let refresh = move || {
        let values = parameters.with_untracked(|ps| execution_values(ps));
        execution.refresh(query_id, values);
    };
    refresh();
    let on_values_change = Callback::new(move |_| refresh());

    let show_parameters = !options.hide_parameters && query.has_parameters();
    let executing = execution.executing();
    let error = execution.error();
    let result = execution.result();

    view! {
        <div class="embed__container">
            {(!options.hide_header)
                .then(|| {
                    view! {
                        <EmbedHeader
                            query=query.clone()
                            visualization=visualization.clone()
                            show_description=options.show_description
                        />
                    }
                })}
            {show_parameters
                .then(|| {
                    view! {
                        <div class="embed__parameters">
                            <ParametersPanel parameters=parameters on_values_change=on_values_change />
                        </div>
                    }
                })}
            <div class="embed__body">
                {move || {
                    if executing.get() {
                        view! {
                            <div class="embed__refreshing">
                                <Spinner />
                                <span>"Refreshing..."</span>
                            </div>
                        }
                        .into_any()
                    } else if let Some(message) = error.get() {
                        view! { <div class="alert alert--error">{format!("Error: {}", message)}</div> }
                            .into_any()
                    } else if let Some(r) = result.get() {
                        view! {
                            <div class="embed__visualization">
                                <ResultTable result=r />
                            </div>
                        }
                        .into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </div>
            <EmbedFooter query=query parameters=parameters execution=execution options=options />
        </div>
    }
    .into_any()
}
