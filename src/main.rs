#![deny(clippy::all, clippy::pedantic)]
#![allow(non_snake_case, clippy::module_name_repetitions)]

use leptos::{component, view, For, IntoView, SignalGet};
use leptos_router::{Route, Router, Routes, A};
use tracing::Level;
use wasm_tracing::WASMLayerConfigBuilder;

use crate::charts::{types::Quantity, Chart};
use crate::dashboard::{create_dashboard, Analytics, Dashboard};
use crate::theme::{create_theme, Theme, ThemeToggle};
use crate::workflow::Workflow;

mod charts;
mod components;
mod dashboard;
mod datetime;
mod request;
mod telemetry;
mod theme;
mod workflow;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(Level::INFO)
            .build(),
    );
    leptos::mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let state = create_dashboard();
    let theme = create_theme();

    view! {
        <main class="container-fluid" class:light-theme=move || theme.get() == Theme::Light>
            <Router>
                <nav>
                    <ul>
                        <li>
                            <strong>
                                <A href="/">"Battery Health Monitor"</A>
                            </strong>
                        </li>
                    </ul>
                    <ul>
                        <li>
                            <A href="/">"Dashboard"</A>
                        </li>
                        <For
                            each=move || Quantity::ALL
                            key=|quantity| *quantity
                            let:quantity
                        >
                            <li>
                                <A href=format!("/charts/{}", quantity.slug())>{quantity.name()}</A>
                            </li>
                        </For>
                        <li>
                            <A href="/analytics">"Analytics"</A>
                        </li>
                        <li>
                            <A href="/workflow">"Workflow"</A>
                        </li>
                        <li>
                            <ThemeToggle theme />
                        </li>
                    </ul>
                </nav>
                <div class="h-full w-full overflow-auto">
                    <Routes>
                        <Route path="/" view=move || view! { <Dashboard state /> } />
                        <Route
                            path="/charts/:quantity"
                            view=move || view! { <Chart snapshot=state.snapshot /> }
                        />
                        <Route path="/analytics" view=move || view! { <Analytics state /> } />
                        <Route path="/workflow" view=Workflow />
                        <Route path="/*any" view=|| view! { <h1>"Not Found"</h1> } />
                    </Routes>
                </div>
            </Router>
        </main>
    }
}
