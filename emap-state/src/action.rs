//! Actions consumed from the dispatch channel.
//!
//! The rendering and data layers send loosely-typed JSON actions
//! (`{"type": "...", ...}`). [`RawAction`] is that wire shape; [`Action`]
//! is the decoded, typed form every reducer matches on.

use crate::application::FieldUpdate;
use crate::data::GridSnapshot;
use crate::error::{Result, StateError};
use crate::{TimeIndex, ZoneId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

pub const APPLICATION_STATE_UPDATE: &str = "APPLICATION_STATE_UPDATE";
pub const GRID_DATA: &str = "GRID_DATA";
pub const UPDATE_SELECTED_ZONE: &str = "UPDATE_SELECTED_ZONE";
pub const UPDATE_SLIDER_SELECTED_ZONE_TIME: &str = "UPDATE_SLIDER_SELECTED_ZONE_TIME";

/// A decoded action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set one application state field
    ApplicationStateUpdate(FieldUpdate),
    /// A fresh grid-data snapshot from the data layer
    GridData(Rc<GridSnapshot>),
    UpdateSelectedZone {
        selected_zone_name: Option<ZoneId>,
    },
    UpdateSliderSelectedZoneTime {
        selected_zone_time_index: Option<TimeIndex>,
    },
    /// Any other action type; every reducer ignores it
    Unknown(String),
}

impl Action {
    /// The wire tag of this action.
    pub fn type_name(&self) -> &str {
        match self {
            Action::ApplicationStateUpdate(_) => APPLICATION_STATE_UPDATE,
            Action::GridData(_) => GRID_DATA,
            Action::UpdateSelectedZone { .. } => UPDATE_SELECTED_ZONE,
            Action::UpdateSliderSelectedZoneTime { .. } => UPDATE_SLIDER_SELECTED_ZONE_TIME,
            Action::Unknown(action_type) => action_type,
        }
    }

    /// Shorthand for an `APPLICATION_STATE_UPDATE`.
    pub fn update(field: FieldUpdate) -> Self {
        Action::ApplicationStateUpdate(field)
    }

    /// Decode a single JSON action.
    ///
    /// ```rust
    /// use emap_state::{Action, StateError};
    ///
    /// let action = Action::from_json(r#"{"type": "UPDATE_SELECTED_ZONE", "payload": {"selectedZoneName": "FR"}}"#).unwrap();
    /// assert_eq!(action.type_name(), "UPDATE_SELECTED_ZONE");
    ///
    /// let err = Action::from_json(r#"{"type": "APPLICATION_STATE_UPDATE", "key": "electricityMixMode", "value": "X"}"#);
    /// assert_eq!(err, Err(StateError::InvalidMixMode("X".to_string())));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawAction =
            serde_json::from_str(json).map_err(|e| StateError::MalformedAction(e.to_string()))?;
        Action::try_from(raw)
    }
}

/// Wire shape of an action.
///
/// `APPLICATION_STATE_UPDATE` carries `key`/`value` at the top level, the
/// other actions carry a `payload` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl RawAction {
    pub fn new(action_type: &str) -> Self {
        Self {
            action_type: action_type.to_string(),
            ..Self::default()
        }
    }

    pub fn update(key: &str, value: Value) -> Self {
        Self {
            key: Some(key.to_string()),
            value,
            ..Self::new(APPLICATION_STATE_UPDATE)
        }
    }

    pub fn with_payload(action_type: &str, payload: Value) -> Self {
        Self {
            payload,
            ..Self::new(action_type)
        }
    }

    fn payload_field(&self, field: &str) -> Value {
        self.payload.get(field).cloned().unwrap_or(Value::Null)
    }
}

/// Missing payload fields read as `null`, like a destructured `undefined`.
fn payload_value<T: serde::de::DeserializeOwned>(raw: &RawAction, field: &str) -> Result<T> {
    serde_json::from_value(raw.payload_field(field)).map_err(|e| {
        StateError::MalformedAction(format!("{} {}: {}", raw.action_type, field, e))
    })
}

impl TryFrom<RawAction> for Action {
    type Error = StateError;

    fn try_from(raw: RawAction) -> Result<Self> {
        match raw.action_type.as_str() {
            APPLICATION_STATE_UPDATE => match raw.key {
                Some(key) => Ok(Action::ApplicationStateUpdate(FieldUpdate::parse(
                    &key, raw.value,
                )?)),
                None => {
                    log::warn!("{} without a key, ignoring", APPLICATION_STATE_UPDATE);
                    Ok(Action::Unknown(raw.action_type))
                }
            },
            GRID_DATA => {
                let snapshot: GridSnapshot = serde_json::from_value(raw.payload)
                    .map_err(|e| StateError::MalformedAction(format!("{}: {}", GRID_DATA, e)))?;
                Ok(Action::GridData(Rc::new(snapshot)))
            }
            UPDATE_SELECTED_ZONE => Ok(Action::UpdateSelectedZone {
                selected_zone_name: payload_value(&raw, "selectedZoneName")?,
            }),
            UPDATE_SLIDER_SELECTED_ZONE_TIME => Ok(Action::UpdateSliderSelectedZoneTime {
                selected_zone_time_index: payload_value(&raw, "selectedZoneTimeIndex")?,
            }),
            _ => Ok(Action::Unknown(raw.action_type)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ElectricityMixMode, Page};
    use serde_json::json;

    #[test]
    fn decodes_application_state_update() {
        let action = Action::try_from(RawAction::update("showPageState", json!("country"))).unwrap();
        assert_eq!(
            action,
            Action::ApplicationStateUpdate(FieldUpdate::ShowPageState(Page::Country))
        );
    }

    #[test]
    fn invalid_mix_mode_surfaces_on_decode() {
        let err = Action::try_from(RawAction::update("electricityMixMode", json!("X"))).unwrap_err();
        assert_eq!(err, StateError::InvalidMixMode("X".to_string()));

        let ok = Action::try_from(RawAction::update("electricityMixMode", json!("production")));
        assert_eq!(
            ok,
            Ok(Action::update(FieldUpdate::ElectricityMixMode(
                ElectricityMixMode::Production
            )))
        );
    }

    #[test]
    fn update_without_key_is_ignored() {
        let action = Action::try_from(RawAction::new(APPLICATION_STATE_UPDATE)).unwrap();
        assert!(matches!(action, Action::Unknown(_)));
    }

    #[test]
    fn decodes_grid_data() {
        let action = Action::from_json(
            r#"{"type": "GRID_DATA", "payload": {"countries": {"FR": {"co2intensity": 56.2}, "DE": {}}}}"#,
        )
        .unwrap();
        match action {
            Action::GridData(snapshot) => {
                assert!(snapshot.contains_zone("FR"));
                assert!(snapshot.contains_zone("DE"));
                assert_eq!(snapshot.zone("FR").and_then(|z| z.co2intensity), Some(56.2));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn grid_data_without_countries_is_malformed() {
        let err = Action::try_from(RawAction::with_payload(GRID_DATA, json!({}))).unwrap_err();
        assert!(matches!(err, StateError::MalformedAction(_)));
    }

    #[test]
    fn missing_payload_fields_read_as_null() {
        let action = Action::try_from(RawAction::new(UPDATE_SELECTED_ZONE)).unwrap();
        assert_eq!(
            action,
            Action::UpdateSelectedZone {
                selected_zone_name: None
            }
        );
        let action = Action::try_from(RawAction::with_payload(
            UPDATE_SLIDER_SELECTED_ZONE_TIME,
            json!({"selectedZoneTimeIndex": 7}),
        ))
        .unwrap();
        assert_eq!(
            action,
            Action::UpdateSliderSelectedZoneTime {
                selected_zone_time_index: Some(7)
            }
        );
    }

    #[test]
    fn unknown_types_decode_to_unknown() {
        let action = Action::from_json(r#"{"type": "WIND_DATA", "payload": [1, 2]}"#).unwrap();
        assert_eq!(action, Action::Unknown("WIND_DATA".to_string()));
        assert_eq!(action.type_name(), "WIND_DATA");
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            Action::from_json("not json"),
            Err(StateError::MalformedAction(_))
        ));
        assert!(matches!(
            Action::from_json(r#"{"payload": {}}"#),
            Err(StateError::MalformedAction(_))
        ));
    }
}
