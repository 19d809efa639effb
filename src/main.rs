#![deny(clippy::all, clippy::pedantic)]
#![allow(non_snake_case, clippy::module_name_repetitions)]

use leptos::{component, view, IntoView};
use leptos_router::{Route, Router, Routes, A};
use wasm_tracing::WASMLayerConfigBuilder;

use crate::home::Home;
use crate::rollout::Rollout;

mod analysis;
mod chart;
mod components;
mod config;
mod datetime;
mod home;
mod request;
mod rollout;
mod types;
mod use_canvas;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(config::log_level())
            .build(),
    );
    leptos::mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    view! {
        <main class="container-fluid">
            <Router>
                <nav>
                    <ul>
                        <li>
                            <strong>
                                <A href="/">"Rollouts"</A>
                            </strong>
                        </li>
                    </ul>
                </nav>
                <div class="h-full w-full overflow-auto">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/rollout/:namespace/:name" view=Rollout />
                        <Route path="/*any" view=|| view! { <h1>"Not Found"</h1> } />
                    </Routes>
                </div>
            </Router>
        </main>
    }
}
