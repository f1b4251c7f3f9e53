use contracts::shared::parameters::{find_parameter, has_pending_values, ParamValue, Parameter};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};

use super::parameter_input::ParameterInput;

/// Parameter inputs of a query with an "Apply Changes" button.
///
/// Edits are stored as pending values; dependent selectors react to them
/// right away. "Apply" moves them into the applied values and fires
/// `on_values_change`.
#[component]
pub fn ParametersPanel(
    parameters: RwSignal<Vec<Parameter>>,
    /// Applied values changed
    on_values_change: Callback<()>,
) -> impl IntoView {
    let all_parameters: Signal<Vec<Parameter>> = parameters.into();
    let has_pending = Signal::derive(move || parameters.with(|ps| has_pending_values(ps)));

    let apply = move |_| {
        parameters.update(|ps| {
            for p in ps.iter_mut() {
                p.apply_pending();
            }
        });
        on_values_change.run(());
    };

    view! {
        <div class="parameter-container">
            <For
                each=move || parameters.get()
                key=|p| p.name.clone()
                children=move |initial: Parameter| {
                    let name = initial.name.clone();
                    let label = initial.label().to_string();
                    let lookup = name.clone();
                    let parameter = Signal::derive(move || {
                        parameters
                            .with(|ps| find_parameter(ps, &lookup).cloned())
                            .unwrap_or_else(|| initial.clone())
                    });
                    let on_select = Callback::new(move |value: Option<ParamValue>| {
                        parameters.update(|ps| {
                            if let Some(p) = ps.iter_mut().find(|p| p.name == name) {
                                p.set_pending(value);
                            }
                        });
                    });
                    let pending = move || parameter.with(|p| p.has_pending());

                    view! {
                        <div class=move || {
                            if pending() { "parameter-block parameter-block--pending" } else { "parameter-block" }
                        }>
                            <label class="parameter-block__label">{label}</label>
                            <ParameterInput
                                parameter=parameter
                                all_parameters=all_parameters
                                on_select=on_select
                            />
                        </div>
                    }
                }
            />
            <Show when=move || has_pending.get()>
                <Button appearance=ButtonAppearance::Primary on_click=apply>
                    "Apply Changes"
                </Button>
            </Show>
        </div>
    }
}
