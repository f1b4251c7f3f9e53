use contracts::shared::query::Query;
use leptos::prelude::*;

use crate::shared::api_utils::api_base;

/// Embed links of every visualization of the query
#[component]
pub fn EmbedPanel(#[prop(into)] query: Signal<Query>, on_close: Callback<()>) -> impl IntoView {
    let origin = api_base();

    let links = move || {
        query.with(|q| {
            q.visualizations
                .iter()
                .map(|v| (v.name.clone(), q.embed_url(&origin, v.id)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="embed-panel">
            <div class="embed-panel__header">
                <span class="embed-panel__title">"Embed Query"</span>
                <button class="embed-panel__close" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            {move || {
                links()
                    .into_iter()
                    .map(|(name, url)| {
                        view! {
                            <div class="embed-panel__row">
                                <label class="form__label">{name}</label>
                                {match url {
                                    Some(url) => view! {
                                        <input class="form__input" readonly=true value=url />
                                    }
                                    .into_any(),
                                    None => view! {
                                        <span class="embed-panel__hint">"Query has no API key"</span>
                                    }
                                    .into_any(),
                                }}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
