//! Root state store managed via Dioxus context.
//!
//! `AppStore` wraps an `emap_state::Store` in signals and is provided with
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppStore>()`, read snapshots and dispatch actions.
//!
//! `dispatch` and `dispatch_raw` never subscribe the caller to the store, so
//! they are safe to call from inside `use_effect`.

use crate::browser::BrowserProbe;
use dioxus::prelude::*;
use emap_state::analytics::{self, AnalyticsSink, LogSink};
use emap_state::{Action, ApplicationState, RawAction, RootState, Store};
use std::rc::Rc;

/// Shared store for the whole app.
#[derive(Clone, Copy)]
pub struct AppStore {
    store: Signal<Store>,
    /// Error message of the last rejected action, if any
    pub error_msg: Signal<Option<String>>,
    /// Whether the first grid snapshot is still pending
    pub loading: Signal<bool>,
    /// Referrer reported to analytics when embedded
    referrer: Signal<Option<String>>,
    sink: Signal<Box<dyn AnalyticsSink>>,
}

impl AppStore {
    /// Create a store seeded from the live browser environment.
    pub fn new() -> Self {
        let probe = BrowserProbe::new();
        Self::with_store(Store::from_probe(&probe), probe.referrer())
    }

    pub fn with_store(store: Store, referrer: Option<String>) -> Self {
        Self::with_sink(store, referrer, LogSink)
    }

    /// Like `with_store`, tracking page views to `sink` instead of the log.
    pub fn with_sink(
        store: Store,
        referrer: Option<String>,
        sink: impl AnalyticsSink + 'static,
    ) -> Self {
        Self {
            store: Signal::new(store),
            error_msg: Signal::new(None),
            loading: Signal::new(true),
            referrer: Signal::new(referrer),
            sink: Signal::new(Box::new(sink)),
        }
    }

    /// Current root snapshot (two `Rc` clones).
    pub fn root(&self) -> RootState {
        self.store.read().state().clone()
    }

    pub fn application(&self) -> Rc<ApplicationState> {
        Rc::clone(&self.store.read().state().application)
    }

    /// Apply an action and track a page view when the page changed.
    pub fn dispatch(&mut self, action: Action) {
        let previous = Rc::clone(&self.store.peek().state().application);
        if matches!(action, Action::GridData(_)) {
            self.loading.set(false);
        }
        let next = Rc::clone(&self.store.write().dispatch(&action).application);
        if next.show_page_state != previous.show_page_state {
            let referrer = self.referrer.peek().clone();
            let mut sink = self.sink.write();
            analytics::page_view(&mut **sink, &next, referrer.as_deref());
        }
    }

    /// Decode and apply a wire action; a rejected action is shown as an error.
    pub fn dispatch_raw(&mut self, raw: RawAction) {
        match Action::try_from(raw) {
            Ok(action) => {
                self.error_msg.set(None);
                self.dispatch(action);
            }
            Err(e) => {
                log::error!("rejected action: {}", e);
                self.error_msg.set(Some(e.to_string()));
            }
        }
    }
}
