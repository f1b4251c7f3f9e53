use contracts::shared::download::{FileType, SingleFlight};
use contracts::shared::query::Query;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::export::download_query_result;
use crate::shared::icons::icon;
use crate::system::auth::ApiCredentials;

/// Export state of one download control.
///
/// At most one download runs at a time; clicks while it runs are ignored.
#[derive(Clone, Copy)]
pub struct DownloadState {
    flight: RwSignal<SingleFlight>,
    error: RwSignal<Option<String>>,
    credentials: StoredValue<ApiCredentials>,
}

impl DownloadState {
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            flight: RwSignal::new(SingleFlight::default()),
            error: RwSignal::new(None),
            credentials: StoredValue::new(credentials),
        }
    }

    /// Credentials from context (api key on embed pages)
    pub fn from_context() -> Self {
        Self::new(use_context::<ApiCredentials>().unwrap_or_default())
    }

    pub fn downloading(&self) -> Signal<bool> {
        let flight = self.flight;
        Signal::derive(move || flight.with(SingleFlight::is_running))
    }

    pub fn error(&self) -> Signal<Option<String>> {
        self.error.into()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Starts an export unless one is already running
    pub fn start(&self, query: Query, file_type: FileType) {
        if !self.flight.try_update(SingleFlight::try_begin).unwrap_or(false) {
            log::debug!("[Download] already running, {:?} ignored", file_type);
            return;
        }
        self.error.set(None);

        let state = *self;
        let credentials = self.credentials.get_value();
        spawn_local(async move {
            let outcome = download_query_result(&query, file_type, &credentials).await;
            match &outcome {
                Ok(filename) => log::info!("[Download] saved {}", filename),
                Err(e) => log::error!("[Download] query {} failed: {}", query.id, e),
            }
            if let Some(message) = state.flight.try_update(|f| f.finish(&outcome)).flatten() {
                state.error.set(Some(message));
            }
        });
    }
}

/// "Download Dataset" button with a CSV / PDF menu
#[component]
pub fn DownloadDatasetMenu(
    #[prop(into)] query: Signal<Query>,
    /// There is a result to export
    #[prop(into)]
    has_result: Signal<bool>,
) -> impl IntoView {
    let state = DownloadState::from_context();
    let open = RwSignal::new(false);
    let downloading = state.downloading();
    let disabled = Signal::derive(move || !has_result.get() || downloading.get());

    view! {
        <div class="dropdown">
            <button
                class="button button--secondary button--small"
                disabled=move || disabled.get()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {icon("download")}
                {move || if downloading.get() { " Downloading..." } else { " Download Dataset" }}
            </button>
            <Show when=move || open.get() && !disabled.get()>
                <div class="dropdown__overlay" on:click=move |_| open.set(false)></div>
                <ul class="dropdown__menu dropdown__menu--up">
                    {FileType::OFFERED
                        .into_iter()
                        .map(|file_type| {
                            view! {
                                <li
                                    class="dropdown__item"
                                    on:click=move |_| {
                                        open.set(false);
                                        state.start(query.get_untracked(), file_type);
                                    }
                                >
                                    {icon("file")}
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

/// Dismissible "Download failed: ..." alert
#[component]
pub fn DownloadErrorAlert(state: DownloadState) -> impl IntoView {
    let error = state.error();
    view! {
        {move || {
            error
                .get()
                .map(|message| {
                    view! {
                        <div class="alert alert--error alert--inline">
                            <span>{message}</span>
                            <button class="alert__close" on:click=move |_| state.clear_error()>
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
