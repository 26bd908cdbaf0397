//! Browser-backed environment probe.
//!
//! Reads `navigator.userAgent`, `window.location`, `document.cookie` and the
//! globals the page template injects (`bundleHash`, `locale`, `isCordova`).

use emap_state::environment::parse_cookie_header;
use emap_state::{EnvironmentProbe, InjectedGlobals};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Window};

/// `EnvironmentProbe` over the live browser window.
///
/// Every accessor falls back to an empty value when there is no window
/// (e.g. in a worker), which yields the documented defaults.
#[derive(Clone, Default)]
pub struct BrowserProbe {
    window: Option<Window>,
}

impl BrowserProbe {
    pub fn new() -> Self {
        Self {
            window: web_sys::window(),
        }
    }

    fn html_document(&self) -> Option<HtmlDocument> {
        self.window
            .as_ref()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()
    }

    fn global(&self, name: &str) -> JsValue {
        self.window
            .as_ref()
            .and_then(|w| js_sys::Reflect::get(w, &JsValue::from_str(name)).ok())
            .unwrap_or(JsValue::UNDEFINED)
    }

    /// Referrer of the page, used as the embedding page's URI.
    pub fn referrer(&self) -> Option<String> {
        let referrer = self.window.as_ref()?.document()?.referrer();
        (!referrer.is_empty()).then_some(referrer)
    }
}

impl EnvironmentProbe for BrowserProbe {
    fn user_agent(&self) -> String {
        self.window
            .as_ref()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default()
    }

    fn location_href(&self) -> String {
        self.window
            .as_ref()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    /// Host name of the page; empty for `file://` (the native shell).
    fn document_domain(&self) -> String {
        self.window
            .as_ref()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default()
    }

    fn is_embedded(&self) -> bool {
        let Some(window) = self.window.as_ref() else {
            return false;
        };
        match window.top() {
            Ok(Some(top)) => top != *window,
            Ok(None) => false,
            // Cross-origin parent
            Err(_) => true,
        }
    }

    fn cookie(&self, key: &str) -> Option<String> {
        let header = self.html_document()?.cookie().ok()?;
        parse_cookie_header(&header, key)
    }

    fn injected_globals(&self) -> InjectedGlobals {
        InjectedGlobals {
            bundle_hash: self.global("bundleHash").as_string(),
            locale: self.global("locale").as_string(),
            is_cordova: self.global("isCordova").is_truthy(),
        }
    }
}
