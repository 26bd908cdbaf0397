//! Electricity map web app.
//!
//! Data flow:
//! 1. On startup the `AppStore` is seeded from the browser environment
//!    (user agent, location, cookies, injected globals).
//! 2. On mount the embedded grid snapshot is dispatched as `GRID_DATA`,
//!    standing in for the polling layer.
//! 3. Components read the store and dispatch actions; every dispatch
//!    replaces the root snapshot.

use dioxus::prelude::*;
use emap_state::action::GRID_DATA;
use emap_state::RawAction;
use emap_ui::components::{
    BackButton, ErrorDisplay, MixModeSelector, TimeSlider, ZonePanel, ZoneSelector,
};
use emap_ui::state::AppStore;

// Embed a grid-data snapshot at compile time.
const GRID_DATA_JSON: &str = include_str!("../../fixtures/grid_data.json");

/// Number of steps on the zone history slider (24 hourly datapoints).
const HISTORY_LENGTH: usize = 24;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("emap-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut store = use_context_provider(AppStore::new);

    // ─── Load the embedded grid snapshot once on mount ───
    use_effect(move || match serde_json::from_str(GRID_DATA_JSON) {
        Ok(payload) => store.dispatch_raw(RawAction::with_payload(GRID_DATA, payload)),
        Err(e) => {
            log::error!("embedded grid data is invalid: {}", e);
            store.error_msg.set(Some("No grid data available.".to_string()));
            store.loading.set(false);
        }
    });

    let app = store.application();
    let class = if app.bright_mode_enabled { "bright" } else { "dark" };

    rsx! {
        div {
            class: "{class}",
            style: "font-family: sans-serif; max-width: 720px; margin: 0 auto; padding: 16px;",
            h1 { "Electricity Map" }
            ErrorDisplay {}
            if (store.loading)() {
                p { "Loading grid data\u{2026}" }
            } else {
                MixModeSelector {}
                ZoneSelector {}
                BackButton {}
                ZonePanel {}
                TimeSlider { max_index: HISTORY_LENGTH - 1 }
            }
        }
    }
}
