use contracts::shared::geo_filter::{CascadeSelectorState, GeoField};
use contracts::shared::parameters::{ParamValue, Parameter};
use leptos::prelude::*;

use super::option_select::OptionSelect;
use crate::shared::parameters::use_filter_cache;

/// Zone / region / depot selector backed by the static filter cache.
///
/// Options are recomputed on mount and whenever an upstream value
/// (including a pending one) changes. A selection that no longer fits the new
/// options is corrected and reported through `on_select`.
#[component]
pub fn CascadingParameterInput(
    field: GeoField,
    /// The parameter this selector edits
    #[prop(into)]
    parameter: Signal<Parameter>,
    /// Every parameter of the query; upstream values are read from here
    #[prop(into)]
    all_parameters: Signal<Vec<Parameter>>,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let cache = use_filter_cache();
    let mode = parameter.with_untracked(|p| p.mode());
    let state = RwSignal::new(CascadeSelectorState::new(field, mode));

    // Upstream changes: new options, correction reported
    Effect::new(move |_| {
        let parameters = all_parameters.get();
        let external = parameter.with_untracked(|p| p.effective_value().cloned());
        let correction = state
            .try_update(|s| s.refresh(&cache, &parameters, external.as_ref()))
            .flatten();
        if let Some(value) = correction {
            log::debug!(
                "{} selection corrected to {:?}",
                field.param_name(),
                value
            );
            on_select.run(value);
        }
    });

    // Own value changes: reconcile for display only
    Effect::new(move |_| {
        let external = parameter.with(|p| p.effective_value().cloned());
        state.update(|s| {
            s.selector.sync_value(external.as_ref());
        });
    });

    let selector = Signal::derive(move || state.with(|s| s.selector.clone()));

    view! { <OptionSelect state=selector on_select=on_select /> }
}
