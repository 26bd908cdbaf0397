//! Time slider for the selected zone.

use crate::state::AppStore;
use dioxus::prelude::*;
use emap_state::Action;

#[derive(Props, Clone, PartialEq)]
pub struct TimeSliderProps {
    /// Highest selectable index (the most recent datapoint)
    pub max_index: usize,
}

/// Range input over the selected zone's history; unset means "latest".
#[component]
pub fn TimeSlider(props: TimeSliderProps) -> Element {
    let mut store = use_context::<AppStore>();
    let app = store.application();
    if !app.is_zone_selected() {
        return rsx! {};
    }
    let max_index = props.max_index;
    let current = app.selected_zone_time_index.unwrap_or(max_index);

    let on_input = move |evt: Event<FormData>| {
        if let Ok(index) = evt.value().parse::<usize>() {
            store.dispatch(Action::UpdateSliderSelectedZoneTime {
                selected_zone_time_index: Some(index.min(max_index)),
            });
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            input {
                r#type: "range",
                min: "0",
                max: "{max_index}",
                value: "{current}",
                style: "flex: 1;",
                oninput: on_input,
            }
            span { "{current} / {max_index}" }
        }
    }
}
