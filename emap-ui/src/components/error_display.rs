//! Rejected-action banner.

use crate::state::AppStore;
use dioxus::prelude::*;

/// Shows the last rejected action, with a button to dismiss it.
#[component]
pub fn ErrorDisplay() -> Element {
    let mut store = use_context::<AppStore>();
    let Some(message) = (store.error_msg)() else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; display: flex; justify-content: space-between;",
            span {
                strong { "Rejected: " }
                "{message}"
            }
            button {
                onclick: move |_| store.error_msg.set(None),
                "Dismiss"
            }
        }
    }
}
