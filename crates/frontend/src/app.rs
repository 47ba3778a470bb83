use crate::dashboards::StockSummaryDashboard;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <StockSummaryDashboard />
        </main>
    }
}
