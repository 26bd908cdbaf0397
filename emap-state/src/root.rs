//! Root state container: `application` and `data` side by side.
//!
//! Consumers address state by path (`application.selectedZoneName`), so the
//! two top-level keys are part of the external contract.

use crate::action::{Action, RawAction};
use crate::application::{self, ApplicationState};
use crate::data::{self, DataState};
use crate::environment::EnvironmentProbe;
use crate::error::Result;
use serde::Serialize;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootState {
    pub application: Rc<ApplicationState>,
    pub data: Rc<DataState>,
}

impl RootState {
    pub fn new(application: ApplicationState) -> Self {
        Self {
            application: Rc::new(application),
            data: Rc::new(DataState::default()),
        }
    }

    /// True when both halves are the very same snapshots.
    pub fn ptr_eq(&self, other: &RootState) -> bool {
        Rc::ptr_eq(&self.application, &other.application) && Rc::ptr_eq(&self.data, &other.data)
    }
}

/// Run both reducers on one action.
pub fn reduce(state: &RootState, action: &Action) -> RootState {
    RootState {
        application: application::reduce(&state.application, action),
        data: data::reduce(&state.data, action),
    }
}

/// Holds the current root state and applies actions one at a time.
///
/// ```rust
/// use emap_state::{Action, ApplicationState, Store};
///
/// let mut store = Store::new(ApplicationState::default());
/// store.dispatch(&Action::UpdateSelectedZone { selected_zone_name: Some("FR".to_string()) });
/// assert_eq!(store.state().application.selected_zone_name.as_deref(), Some("FR"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: RootState,
    dispatched: u64,
}

impl Store {
    pub fn new(initial: ApplicationState) -> Self {
        Self {
            state: RootState::new(initial),
            dispatched: 0,
        }
    }

    pub fn from_probe(probe: &impl EnvironmentProbe) -> Self {
        Self::new(ApplicationState::initial(probe))
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatched
    }

    pub fn dispatch(&mut self, action: &Action) -> &RootState {
        log::debug!("dispatch {}", action.type_name());
        self.state = reduce(&self.state, action);
        self.dispatched += 1;
        &self.state
    }

    /// Decode and dispatch a wire action.
    ///
    /// A decode error (including a rejected `electricityMixMode`) is
    /// returned before anything is applied.
    pub fn dispatch_raw(&mut self, raw: RawAction) -> Result<&RootState> {
        let action = Action::try_from(raw).inspect_err(|e| log::error!("rejected action: {}", e))?;
        Ok(self.dispatch(&action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Page;
    use crate::error::StateError;
    use crate::environment::StaticProbe;
    use serde_json::json;

    #[test]
    fn unknown_action_keeps_both_snapshots() {
        let state = RootState::default();
        let next = reduce(&state, &Action::Unknown("@@INIT".to_string()));
        assert!(next.ptr_eq(&state));
    }

    #[test]
    fn grid_data_reaches_both_reducers() {
        let mut store = Store::new(ApplicationState {
            selected_zone_name: Some("DE".to_string()),
            show_page_state: Page::Country,
            page_to_go_back_to: Some(Page::Map),
            ..ApplicationState::default()
        });
        store
            .dispatch_raw(RawAction::with_payload(
                "GRID_DATA",
                json!({"countries": {"FR": {}}}),
            ))
            .unwrap();
        let state = store.state();
        assert_eq!(state.application.selected_zone_name, None);
        assert_eq!(state.application.show_page_state, Page::Map);
        assert_eq!(state.data.grid_updates, 1);
        assert!(state.data.grid.as_ref().unwrap().contains_zone("FR"));
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut store = Store::from_probe(&StaticProbe::default());
        let before = store.state().clone();
        let err = store
            .dispatch_raw(RawAction::update("electricityMixMode", json!("X")))
            .unwrap_err();
        assert_eq!(err, StateError::InvalidMixMode("X".to_string()));
        assert!(store.state().ptr_eq(&before));
        assert_eq!(store.dispatch_count(), 0);
    }

    #[test]
    fn serializes_under_fixed_keys() {
        let store = Store::new(ApplicationState::default());
        let value = serde_json::to_value(store.state()).unwrap();
        assert_eq!(value["application"]["showPageState"], json!("map"));
        assert_eq!(value["data"]["gridUpdates"], json!(0));
        assert_eq!(value["data"]["grid"], json!(null));
    }

    #[test]
    fn navigation_session() {
        let mut store = Store::new(ApplicationState::default());
        let actions = [
            RawAction::with_payload("UPDATE_SELECTED_ZONE", json!({"selectedZoneName": "FR"})),
            RawAction::update("showPageState", json!("country")),
            RawAction::with_payload(
                "UPDATE_SLIDER_SELECTED_ZONE_TIME",
                json!({"selectedZoneTimeIndex": 3}),
            ),
            RawAction::with_payload(
                "UPDATE_SLIDER_SELECTED_ZONE_TIME",
                json!({"selectedZoneTimeIndex": 9}),
            ),
        ];
        for action in actions {
            store.dispatch_raw(action).unwrap();
        }
        let app = &store.state().application;
        assert_eq!(app.selected_zone_name.as_deref(), Some("FR"));
        assert_eq!(app.show_page_state, Page::Country);
        assert_eq!(app.page_to_go_back_to, Some(Page::Map));
        assert_eq!(app.selected_zone_time_index, Some(9));
        assert_eq!(app.previous_selected_zone_time_index, Some(3));
        assert_eq!(store.dispatch_count(), 4);
    }
}
