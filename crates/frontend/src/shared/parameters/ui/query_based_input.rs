use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use contracts::shared::parameters::{
    LoadOutcome, ParamValue, Parameter, QueryOptionsState, SelectOption,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::option_select::OptionSelect;
use crate::shared::fault::use_fault_reporter;
use crate::shared::query::api;
use crate::system::auth::ApiCredentials;

pub type OptionsFuture = Pin<Box<dyn Future<Output = Result<Vec<SelectOption>, String>>>>;

/// Fetches the option list of a query-backed parameter
#[derive(Clone)]
pub struct OptionsLoader(Arc<dyn Fn(i64) -> OptionsFuture + Send + Sync>);

impl OptionsLoader {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn(i64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SelectOption>, String>> + 'static,
    {
        Self(Arc::new(move |query_id| Box::pin(load(query_id))))
    }

    /// Loader calling `GET /api/queries/{id}/dropdown`
    pub fn dropdown(credentials: ApiCredentials) -> Self {
        Self::new(move |query_id| {
            let credentials = credentials.clone();
            async move { api::load_dropdown_values(query_id, &credentials).await }
        })
    }

    pub fn load(&self, query_id: i64) -> OptionsFuture {
        (self.0)(query_id)
    }
}

/// Selector whose options are the result of another query.
///
/// Every change of `query_id` starts a new load; a response arriving after a
/// newer load was started is dropped. Loader failures go to the fault banner.
#[component]
pub fn QueryBasedParameterInput(
    #[prop(into)] parameter: Signal<Parameter>,
    /// Source query of the options; `None` shows an empty list
    #[prop(into)]
    query_id: Signal<Option<i64>>,
    loader: OptionsLoader,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let faults = use_fault_reporter();
    let mode = parameter.with_untracked(|p| p.mode());
    let state = RwSignal::new(QueryOptionsState::new(mode));
    // `query_id` derives from the whole parameter list; only a new key matters
    let key = Memo::new(move |_| query_id.get());

    Effect::new(move |_| {
        let key = key.get();
        let Some(ticket) = state.try_update(|s| s.request(key)).flatten() else {
            return;
        };
        let loader = loader.clone();
        spawn_local(async move {
            match loader.load(ticket.key).await {
                Ok(options) => {
                    let external = parameter.with_untracked(|p| p.effective_value().cloned());
                    match state.try_update(|s| s.complete(&ticket, options, external.as_ref())) {
                        Some(LoadOutcome::Applied {
                            report: Some(value),
                        }) => on_select.run(value),
                        Some(LoadOutcome::Stale) => {
                            log::debug!("Dropping stale options of query {}", ticket.key)
                        }
                        _ => {}
                    }
                }
                Err(e) => {
                    // stale failures are still faults, they just leave the spinner alone
                    let current = state.try_update(|s| s.fail(&ticket)).unwrap_or(false);
                    if !current {
                        log::debug!("Failure of superseded load for query {}", ticket.key);
                    }
                    faults.report(
                        "QueryBasedParameterInput",
                        format!("Failed to load options of query {}: {}", ticket.key, e),
                    );
                }
            }
        });
    });

    Effect::new(move |_| {
        let external = parameter.with(|p| p.effective_value().cloned());
        state.update(|s| {
            s.selector.sync_value(external.as_ref());
        });
    });

    let selector = Signal::derive(move || state.with(|s| s.selector.clone()));
    let loading = Signal::derive(move || state.with(|s| s.loading));

    view! { <OptionSelect state=selector loading=loading on_select=on_select /> }
}
