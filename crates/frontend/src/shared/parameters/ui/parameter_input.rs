use contracts::shared::geo_filter::GeoField;
use contracts::shared::parameters::{ParamValue, Parameter, ParameterKind, SelectorState};
use leptos::prelude::*;

use super::cascading_input::CascadingParameterInput;
use super::option_select::OptionSelect;
use super::query_based_input::{OptionsLoader, QueryBasedParameterInput};
use crate::system::auth::ApiCredentials;

/// Input matching the parameter kind
#[component]
pub fn ParameterInput(
    #[prop(into)] parameter: Signal<Parameter>,
    #[prop(into)] all_parameters: Signal<Vec<Parameter>>,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let (kind, name) = parameter.with_untracked(|p| (p.kind.clone(), p.name.clone()));

    match kind {
        ParameterKind::Query { .. } => {
            let credentials = use_context::<ApiCredentials>().unwrap_or_default();
            let query_id = Signal::derive(move || {
                parameter.with(|p| match p.kind {
                    ParameterKind::Query { query_id } => Some(query_id),
                    _ => None,
                })
            });
            view! {
                <QueryBasedParameterInput
                    parameter=parameter
                    query_id=query_id
                    loader=OptionsLoader::dropdown(credentials)
                    on_select=on_select
                />
            }
            .into_any()
        }
        ParameterKind::Enum { .. } => {
            let state = Signal::derive(move || {
                parameter.with(|p| {
                    let mut state = SelectorState::new(p.mode());
                    state.options = p.enum_values();
                    state.sync_value(p.effective_value());
                    state
                })
            });
            view! { <OptionSelect state=state on_select=on_select /> }.into_any()
        }
        ParameterKind::ExternalApi => match GeoField::from_param_name(&name) {
            Some(field) => view! {
                <CascadingParameterInput
                    field=field
                    parameter=parameter
                    all_parameters=all_parameters
                    on_select=on_select
                />
            }
            .into_any(),
            None => view! { <TextInput parameter=parameter on_select=on_select /> }.into_any(),
        },
        ParameterKind::Number => {
            view! { <TextInput parameter=parameter numeric=true on_select=on_select /> }
                .into_any()
        }
        ParameterKind::Text | ParameterKind::Other => {
            view! { <TextInput parameter=parameter on_select=on_select /> }.into_any()
        }
    }
}

#[component]
fn TextInput(
    parameter: Signal<Parameter>,
    #[prop(optional)] numeric: bool,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let text = move || {
        parameter.with(|p| p.effective_value().map(ParamValue::display).unwrap_or_default())
    };

    view! {
        <input
            class="form__input"
            type=if numeric { "number" } else { "text" }
            prop:value=text
            on:change=move |ev| {
                let value = event_target_value(&ev);
                on_select.run((!value.trim().is_empty()).then_some(ParamValue::Single(value)));
            }
        />
    }
}
