use contracts::shared::parameters::{ParamValue, SelectMode, SelectorState};
use leptos::prelude::*;
use thaw::Spinner;

/// Select over a `SelectorState`: native select in single mode, checkbox list
/// with a "Select All" row in multiple mode. Both carry a search box that
/// narrows the listed options.
///
/// The component never changes the selection itself; every user action is
/// reported through `on_select` and comes back via `state`.
#[component]
pub fn OptionSelect(
    /// Options and reconciled value
    #[prop(into)]
    state: Signal<SelectorState>,
    /// Options are being loaded; interaction is disabled meanwhile
    #[prop(optional, into)]
    loading: MaybeProp<bool>,
    /// New value chosen by the user
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let is_loading = Signal::derive(move || loading.get().unwrap_or(false));
    // mode is fixed for the lifetime of a selector
    let multiple = state.with_untracked(|s| s.mode == SelectMode::Multiple);

    let select = if multiple {
        view! { <MultiOptionList state=state loading=is_loading on_select=on_select /> }.into_any()
    } else {
        view! { <SingleOptionSelect state=state loading=is_loading on_select=on_select /> }.into_any()
    };

    view! {
        <span class="option-select">
            {select}
            <Show when=move || is_loading.get()>
                <Spinner />
            </Show>
        </span>
    }
}

#[component]
fn SingleOptionSelect(
    state: Signal<SelectorState>,
    loading: Signal<bool>,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let search = RwSignal::new(String::new());

    view! {
        <OptionSearch search=search loading=loading />
        <select
            class="form__select"
            disabled=move || loading.get()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                on_select.run((!value.is_empty()).then_some(ParamValue::Single(value)));
            }
        >
            <Show when=move || state.with(|s| s.options.is_empty())>
                <option value="" selected=true>"No options available"</option>
            </Show>
            <For
                each=move || state.with(|s| s.visible_options(&search.get()))
                key=|option| option.value.clone()
                children=move |option| {
                    let value = option.value.clone();
                    let is_selected = move || {
                        state.with(|s| matches!(&s.value, Some(ParamValue::Single(v)) if *v == value))
                    };
                    view! {
                        <option value=option.value selected=is_selected>
                            {option.name}
                        </option>
                    }
                }
            />
        </select>
    }
}

#[component]
fn MultiOptionList(
    state: Signal<SelectorState>,
    loading: Signal<bool>,
    on_select: Callback<Option<ParamValue>>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let visible = Memo::new(move |_| state.with(|s| s.visible_options(&search.get())));
    let all_selected = move || visible.with(|v| state.with(|s| s.is_all_selected_in(v)));

    let summary = move || {
        state.with(|s| {
            let selected = s.selected();
            match selected.len() {
                0 => "Select...".to_string(),
                1..=3 => selected.join(", "),
                n => format!("{} selected", n),
            }
        })
    };

    let toggle_all = move |_| {
        let toggled = visible.with_untracked(|v| state.with_untracked(|s| s.select_all_toggled_in(v)));
        if let Some(value) = toggled {
            on_select.run(Some(value));
        }
    };

    view! {
        <div class="multi-select">
            <button
                class="form__select multi-select__trigger"
                disabled=move || loading.get()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {summary}
            </button>
            <Show when=move || open.get() && !loading.get()>
                <div class="multi-select__menu">
                    <OptionSearch search=search loading=loading />
                    <Show
                        when=move || state.with(|s| !s.options.is_empty())
                        fallback=|| view! { <div class="multi-select__empty">"No options available"</div> }
                    >
                        <div
                            class=move || {
                                if all_selected() {
                                    "multi-select__all multi-select__all--active"
                                } else {
                                    "multi-select__all"
                                }
                            }
                            on:mousedown=|ev| ev.prevent_default()
                            on:click=toggle_all
                        >
                            {move || if all_selected() { "✓ Select All" } else { "Select All" }}
                        </div>
                        <For
                            each=move || visible.get()
                            key=|option| option.value.clone()
                            children=move |option| {
                                let value = option.value.clone();
                                let checked_value = option.value.clone();
                                let is_checked = move || {
                                    state.with(|s| s.selected().contains(&checked_value))
                                };
                                view! {
                                    <label class="multi-select__option">
                                        <input
                                            type="checkbox"
                                            prop:checked=is_checked
                                            on:change=move |_| {
                                                let toggled = state
                                                    .with_untracked(|s| s.with_option_toggled(&value));
                                                on_select.run(toggled);
                                            }
                                        />
                                        <span>{option.name}</span>
                                    </label>
                                }
                            }
                        />
                    </Show>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn OptionSearch(search: RwSignal<String>, loading: Signal<bool>) -> impl IntoView {
    view! {
        <input
            type="search"
            class="form__input option-search"
            placeholder="Search..."
            disabled=move || loading.get()
            prop:value=move || search.get()
            on:input=move |ev| search.set(event_target_value(&ev))
        />
    }
}
