use contracts::shared::query::{Query, Visualization};
use leptos::prelude::*;

use crate::shared::markdown::render_markdown;

#[component]
pub fn EmbedHeader(query: Query, visualization: Visualization, show_description: bool) -> impl IntoView {
    let description = query
        .description
        .clone()
        .filter(|d| show_description && !d.trim().is_empty())
        .map(|d| render_markdown(&d));

    view! {
        <div class="embed__header">
            <h3 class="embed__title">
                {visualization.name}
                <small class="embed__subtitle">{query.name}</small>
            </h3>
            {description.map(|html| view! { <div class="embed__description" inner_html=html></div> })}
        </div>
    }
}
