//! Back navigation out of a detail page.

use crate::state::AppStore;
use dioxus::prelude::*;
use emap_state::{Action, FieldUpdate, Page};

/// Returns to the last map-family page. Hidden on the map itself.
#[component]
pub fn BackButton() -> Element {
    let mut store = use_context::<AppStore>();
    let app = store.application();
    if app.show_page_state == Page::Map {
        return rsx! {};
    }
    let target = app.back_target();
    let label = format!("\u{2190} Back to {}", target);

    rsx! {
        button {
            style: "margin: 8px 0;",
            onclick: move |_| {
                store.dispatch(Action::update(FieldUpdate::ShowPageState(target.clone())));
            },
            "{label}"
        }
    }
}
