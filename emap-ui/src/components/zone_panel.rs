//! Detail panel of the selected zone.

use crate::state::AppStore;
use dioxus::prelude::*;
use emap_state::{ElectricityMixMode, Page};

#[component]
pub fn ZonePanel() -> Element {
    let store = use_context::<AppStore>();
    let root = store.root();
    let app = &root.application;
    if app.show_page_state != Page::Country {
        return rsx! {};
    }
    let Some(zone_id) = app.selected_zone_name.clone() else {
        return rsx! {};
    };
    let zone = root
        .data
        .grid
        .as_ref()
        .and_then(|grid| grid.zone(&zone_id).cloned())
        .unwrap_or_default();

    let intensity = zone
        .co2intensity
        .map(|v| format!("{:.0} gCO\u{2082}eq/kWh", v))
        .unwrap_or_else(|| "?".to_string());
    let mode = app.electricity_mix_mode;
    let mode_label = match mode {
        ElectricityMixMode::Consumption => "Consumed",
        ElectricityMixMode::Production => "Produced",
    };
    let total = format!("{:.0} MW", zone.total(mode));
    let rows: Vec<(String, String)> = zone
        .breakdown(mode)
        .iter()
        .map(|(mode, value)| {
            let shown = value.map(|v| format!("{:.0} MW", v)).unwrap_or_else(|| "?".to_string());
            (mode.clone(), shown)
        })
        .collect();

    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; border: 1px solid #ddd; border-radius: 4px;",
            h2 { "{zone_id}" }
            p { "Carbon intensity: {intensity}" }
            p { "{mode_label} electricity: {total}" }
            table {
                for (mode, shown) in rows {
                    tr {
                        key: "{mode}",
                        td { "{mode}" }
                        td { "{shown}" }
                    }
                }
            }
        }
    }
}
