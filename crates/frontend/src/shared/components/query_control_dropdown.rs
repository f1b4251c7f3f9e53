use contracts::shared::download::FileType;
use contracts::shared::query::{Query, QueryResult};
use leptos::prelude::*;

use super::download_menu::{DownloadErrorAlert, DownloadState};
use crate::shared::config::use_client_config;
use crate::shared::icons::icon;

/// "More actions" menu of a query: dashboard, embed and dataset downloads.
///
/// Download items are disabled while the query executes, when there is no
/// result data, and while a download of this control is running.
#[component]
pub fn QueryControlDropdown(
    #[prop(into)] query: Signal<Query>,
    #[prop(into)] query_result: Signal<Option<QueryResult>>,
    #[prop(into)] query_executing: Signal<bool>,
    /// Item hidden when not given
    #[prop(optional)]
    on_add_to_dashboard: Option<Callback<()>>,
    /// Item hidden when not given
    #[prop(optional)]
    on_embed: Option<Callback<()>>,
) -> impl IntoView {
    let config = use_client_config();
    let state = DownloadState::from_context();
    let downloading = state.downloading();
    let open = RwSignal::new(false);

    let download_disabled = Signal::derive(move || {
        query_executing.get()
            || !query_result.with(|r| r.as_ref().is_some_and(QueryResult::has_data))
            || downloading.get()
    });
    let show_add = move || query.with(Query::can_add_to_dashboard);
    let show_embed = move || !config.disable_public_urls && query.with(|q| !q.is_new());

    view! {
        <div class="dropdown">
            <button
                class=move || {
                    if downloading.get() {
                        "button button--secondary button--icon button--loading"
                    } else {
                        "button button--secondary button--icon"
                    }
                }
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {icon("ellipsis")}
            </button>
            <Show when=move || open.get()>
                <div class="dropdown__overlay" on:click=move |_| open.set(false)></div>
                <ul class="dropdown__menu dropdown__menu--right">
                    {on_add_to_dashboard
                        .map(|callback| {
                            view! {
                                <Show when=show_add>
                                    <li
                                        class="dropdown__item"
                                        on:click=move |_| {
                                            open.set(false);
                                            callback.run(());
                                        }
                                    >
                                        {icon("plus")}
                                        <span>"Add to Dashboard"</span>
                                    </li>
                                </Show>
                            }
                        })}
                    {on_embed
                        .map(|callback| {
                            view! {
                                <Show when=show_embed>
                                    <li
                                        class="dropdown__item"
                                        on:click=move |_| {
                                            open.set(false);
                                            callback.run(());
                                        }
                                    >
                                        {icon("share")}
                                        <span>"Embed Elsewhere"</span>
                                    </li>
                                </Show>
                            }
                        })}
                    {FileType::OFFERED
                        .into_iter()
                        .map(|file_type| {
                            view! {
                                <li
                                    class=move || {
                                        if download_disabled.get() {
                                            "dropdown__item dropdown__item--disabled"
                                        } else {
                                            "dropdown__item"
                                        }
                                    }
                                    on:click=move |_| {
                                        if download_disabled.get_untracked() {
                                            return;
                                        }
                                        open.set(false);
                                        state.start(query.get_untracked(), file_type);
                                    }
                                >
                                    {icon("download")}
                                    <span>{file_type.menu_label()}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
            <DownloadErrorAlert state=state />
        </div>
    }
}
