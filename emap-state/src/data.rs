//! Grid-data domain: the latest snapshot fetched by the data layer.
//!
//! The polling layer lives outside this crate; it only hands over
//! `GRID_DATA` actions. This reducer keeps the most recent snapshot so the
//! rendering layer can read zones by id.

use crate::action::Action;
use crate::application::ElectricityMixMode;
use crate::ZoneId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Electricity data of a single zone.
///
/// Only the fields the UI state cares about are typed; everything else the
/// data layer sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneData {
    /// Carbon intensity in gCO2eq/kWh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fossil_fuel_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable_ratio: Option<f64>,
    /// Production per mode (solar, wind, ...) in MW; `None` when unknown
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub production: BTreeMap<String, Option<f64>>,
    /// Consumption per mode in MW, imports included; `None` when unknown
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub consumption: BTreeMap<String, Option<f64>>,
    /// Net exchange per neighbouring zone in MW (positive = import)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exchange: BTreeMap<ZoneId, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ZoneData {
    /// Per-mode figures under the given accounting.
    pub fn breakdown(&self, mode: ElectricityMixMode) -> &BTreeMap<String, Option<f64>> {
        match mode {
            ElectricityMixMode::Consumption => &self.consumption,
            ElectricityMixMode::Production => &self.production,
        }
    }

    /// Sum of the known figures under the given accounting, in MW.
    pub fn total(&self, mode: ElectricityMixMode) -> f64 {
        self.breakdown(mode).values().flatten().sum()
    }
}

/// One grid-data snapshot, keyed by zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub countries: BTreeMap<ZoneId, ZoneData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
}

impl GridSnapshot {
    pub fn contains_zone(&self, zone: &str) -> bool {
        self.countries.contains_key(zone)
    }

    pub fn zone(&self, zone: &str) -> Option<&ZoneData> {
        self.countries.get(zone)
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &ZoneId> {
        self.countries.keys()
    }
}

/// Data-domain state, the sibling of `ApplicationState` under `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataState {
    pub grid: Option<Rc<GridSnapshot>>,
    /// Number of snapshots received this session
    pub grid_updates: u64,
}

/// Keep the newest grid snapshot; ignore everything else.
pub fn reduce(state: &Rc<DataState>, action: &Action) -> Rc<DataState> {
    match action {
        Action::GridData(snapshot) => {
            log::debug!(
                "data: grid snapshot with {} zones",
                snapshot.countries.len()
            );
            Rc::new(DataState {
                grid: Some(Rc::clone(snapshot)),
                grid_updates: state.grid_updates + 1,
            })
        }
        _ => Rc::clone(state),
    }
}
