//! Consumption / production selector.

use crate::state::AppStore;
use dioxus::prelude::*;
use emap_state::{ElectricityMixMode, RawAction};

/// Dropdown for the electricity mix mode.
///
/// The selected value goes through the wire decoder, so anything other than
/// the two modes shows up in the error banner instead of the state.
#[component]
pub fn MixModeSelector() -> Element {
    let mut store = use_context::<AppStore>();
    let current_mode = store.application().electricity_mix_mode;

    let on_mode_change = move |evt: Event<FormData>| {
        let value = serde_json::Value::String(evt.value());
        store.dispatch_raw(RawAction::update("electricityMixMode", value));
    };

    rsx! {
        label {
            style: "font-weight: bold; margin: 8px 0; display: block;",
            "Mode: "
            select {
                onchange: on_mode_change,
                for mode in [ElectricityMixMode::Consumption, ElectricityMixMode::Production] {
                    option {
                        key: "{mode}",
                        value: mode.as_str(),
                        selected: current_mode == mode,
                        "{mode}"
                    }
                }
            }
        }
    }
}
