//! Top-level fault handler
//!
//! Failures that components do not handle themselves (option loader errors,
//! missing visualizations, query load errors) are reported here. They are
//! logged and shown in a dismissible banner.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FaultReporter {
    faults: RwSignal<Vec<String>>,
}

impl FaultReporter {
    pub fn new() -> Self {
        Self {
            faults: RwSignal::new(vec![]),
        }
    }

    pub fn report(&self, source: &str, message: impl Into<String>) {
        let message = message.into();
        log::error!("[{}] {}", source, message);
        self.faults.update(|faults| faults.push(message));
    }

    pub fn dismiss(&self, index: usize) {
        self.faults.update(|faults| {
            if index < faults.len() {
                faults.remove(index);
            }
        });
    }

    pub fn faults(&self) -> Signal<Vec<String>> {
        self.faults.into()
    }
}

impl Default for FaultReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the fault reporter
pub fn use_fault_reporter() -> FaultReporter {
    use_context::<FaultReporter>().expect("FaultReporter not provided")
}

/// Banner listing reported faults
#[component]
pub fn FaultBanner() -> impl IntoView {
    let reporter = use_fault_reporter();
    let faults = reporter.faults();

    view! {
        <Show when=move || !faults.get().is_empty()>
            <div class="fault-banner">
                {move || {
                    faults
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, message)| {
                            view! {
                                <div class="alert alert--error fault-banner__item">
                                    <span>{message}</span>
                                    <button
                                        class="fault-banner__close"
                                        on:click=move |_| reporter.dismiss(index)
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
