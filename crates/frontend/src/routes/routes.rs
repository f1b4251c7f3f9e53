use crate::dashboards::{QueryViewPage, VisualizationEmbedPage};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--empty">
            <h2>"Page not found"</h2>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route
                    path=path!("/embed/query/:query_id/visualization/:visualization_id")
                    view=VisualizationEmbedPage
                />
                <Route path=path!("/queries/:query_id") view=QueryViewPage />
            </Routes>
        </Router>
    }
}
