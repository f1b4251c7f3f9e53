use crate::routes::routes::AppRoutes;
use crate::shared::config::provide_client_config;
use crate::shared::fault::{FaultBanner, FaultReporter};
use crate::shared::parameters::provide_filter_cache;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Faults not handled by components end up in the banner
    provide_context(FaultReporter::new());

    provide_client_config();

    // Zone / region / depot lookup, built once
    provide_filter_cache();

    view! {
        <FaultBanner />
        <AppRoutes />
    }
}
