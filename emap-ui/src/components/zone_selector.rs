//! Zone selection dropdown.

use crate::state::AppStore;
use dioxus::prelude::*;
use emap_state::{Action, FieldUpdate, Page};

/// Lists the zones of the latest grid snapshot. Picking one selects it and
/// opens its detail page; the empty entry clears the selection.
#[component]
pub fn ZoneSelector() -> Element {
    let mut store = use_context::<AppStore>();
    let root = store.root();
    let selected = root.application.selected_zone_name.clone().unwrap_or_default();
    let zones: Vec<String> = root
        .data
        .grid
        .as_ref()
        .map(|grid| grid.zone_ids().cloned().collect())
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        let zone = evt.value();
        if zone.is_empty() {
            let back = store.application().back_target();
            store.dispatch(Action::UpdateSelectedZone {
                selected_zone_name: None,
            });
            store.dispatch(Action::update(FieldUpdate::ShowPageState(back)));
        } else {
            store.dispatch(Action::UpdateSelectedZone {
                selected_zone_name: Some(zone),
            });
            store.dispatch(Action::update(FieldUpdate::ShowPageState(Page::Country)));
        }
    };

    rsx! {
        label {
            style: "font-weight: bold; margin: 8px 0; display: block;",
            "Zone: "
            select {
                onchange: on_change,
                option { value: "", selected: selected.is_empty(), "(none)" }
                for zone in zones {
                    option {
                        key: "{zone}",
                        value: "{zone}",
                        selected: zone == selected,
                        "{zone}"
                    }
                }
            }
        }
    }
}
