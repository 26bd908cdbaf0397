//! Application (UI-navigation and display-mode) state and its reducer.
//!
//! `ApplicationState` holds everything that is not grid data: which zone is
//! selected, where the time slider sits, which page is visible and the
//! handful of user toggles that are also sent along with analytics events.

use crate::action::Action;
use crate::environment::{cookies, EnvironmentProbe};
use crate::error::{Result, StateError};
use crate::{TimeIndex, ZoneId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// A top-level UI page.
///
/// Serialized as the bare page identifier so it round-trips with whatever
/// the rendering layer sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Page {
    /// World map overview
    #[default]
    Map,
    /// Detail panel of the selected zone
    Country,
    /// Any other page (info, faq, ...)
    Other(String),
}

impl Page {
    pub fn as_str(&self) -> &str {
        match self {
            Page::Map => "map",
            Page::Country => "country",
            Page::Other(name) => name,
        }
    }
}

impl From<String> for Page {
    fn from(name: String) -> Self {
        match name.as_str() {
            "map" => Page::Map,
            "country" => Page::Country,
            _ => Page::Other(name),
        }
    }
}

impl From<&str> for Page {
    fn from(name: &str) -> Self {
        Page::from(name.to_string())
    }
}

impl From<Page> for String {
    fn from(page: Page) -> Self {
        match page {
            Page::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether displayed values use consumption- or production-based accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricityMixMode {
    #[default]
    Consumption,
    Production,
}

impl ElectricityMixMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectricityMixMode::Consumption => "consumption",
            ElectricityMixMode::Production => "production",
        }
    }
}

impl FromStr for ElectricityMixMode {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "consumption" => Ok(ElectricityMixMode::Consumption),
            "production" => Ok(ElectricityMixMode::Production),
            other => Err(StateError::InvalidMixMode(other.to_string())),
        }
    }
}

impl fmt::Display for ElectricityMixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of client running the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClientType {
    #[default]
    #[serde(rename = "web")]
    Web,
    #[serde(rename = "mobileapp")]
    MobileApp,
}

/// Non-data UI state (also sent along with analytics and crash reports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationState {
    pub bundle_hash: Option<String>,
    /// `[longitude, latitude]` of the caller, once geolocated
    pub caller_location: Option<[f64; 2]>,
    pub caller_zone: Option<ZoneId>,
    pub client_type: ClientType,
    pub color_blind_mode_enabled: bool,
    pub bright_mode_enabled: bool,
    pub custom_date: Option<DateTime<Utc>>,
    pub electricity_mix_mode: ElectricityMixMode,
    pub is_cordova: bool,
    pub is_embedded: bool,
    pub is_left_panel_collapsed: bool,
    pub is_mobile: bool,
    pub is_production: bool,
    pub is_localhost: bool,
    pub legend_visible: bool,
    pub locale: Option<String>,
    pub onboarding_seen: bool,
    pub tooltip_display_mode: Option<String>,
    pub search_query: Option<String>,
    /// Zone being inspected; always present in the latest grid snapshot
    pub selected_zone_name: Option<ZoneId>,
    pub selected_zone_time_index: Option<TimeIndex>,
    /// Value of `selected_zone_time_index` before the last slider move
    pub previous_selected_zone_time_index: Option<TimeIndex>,
    pub solar_enabled: bool,
    pub use_remote_endpoint: bool,
    pub wind_enabled: bool,
    pub show_page_state: Page,
    /// Page restored when leaving a non-map page
    pub page_to_go_back_to: Option<Page>,
    /// UI-only scratch keys the typed fields don't know about
    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            bundle_hash: None,
            caller_location: None,
            caller_zone: None,
            client_type: ClientType::Web,
            color_blind_mode_enabled: false,
            bright_mode_enabled: true,
            custom_date: None,
            electricity_mix_mode: ElectricityMixMode::Consumption,
            is_cordova: false,
            is_embedded: false,
            is_left_panel_collapsed: false,
            is_mobile: false,
            is_production: false,
            is_localhost: false,
            legend_visible: false,
            locale: None,
            onboarding_seen: false,
            tooltip_display_mode: None,
            search_query: None,
            selected_zone_name: None,
            selected_zone_time_index: None,
            previous_selected_zone_time_index: None,
            solar_enabled: false,
            use_remote_endpoint: false,
            wind_enabled: false,
            show_page_state: Page::Map,
            page_to_go_back_to: None,
            extras: BTreeMap::new(),
        }
    }
}

impl ApplicationState {
    /// Build the initial state from the environment the app starts in.
    ///
    /// The probe is read once; nothing here is re-read afterwards.
    ///
    /// ```rust
    /// use emap_state::{ApplicationState, StaticProbe};
    ///
    /// let probe = StaticProbe::default().with_cookie("brightModeEnabled", "false");
    /// let state = ApplicationState::initial(&probe);
    /// assert!(!state.bright_mode_enabled);
    /// assert_eq!(state.show_page_state.as_str(), "map");
    /// ```
    pub fn initial(probe: &impl EnvironmentProbe) -> Self {
        let globals = probe.injected_globals();
        Self {
            bundle_hash: globals.bundle_hash,
            client_type: if globals.is_cordova {
                ClientType::MobileApp
            } else {
                ClientType::Web
            },
            color_blind_mode_enabled: probe.cookie_bool(cookies::COLOR_BLIND_MODE, false),
            bright_mode_enabled: probe.cookie_bool(cookies::BRIGHT_MODE, true),
            is_cordova: globals.is_cordova,
            is_embedded: probe.is_embedded(),
            is_mobile: probe.ua_is_mobile(),
            is_production: probe.is_production(),
            is_localhost: probe.is_localhost(),
            locale: globals.locale,
            onboarding_seen: probe.cookie_bool(cookies::ONBOARDING_SEEN, false),
            solar_enabled: probe.cookie_bool(cookies::SOLAR, false),
            use_remote_endpoint: probe.use_remote_endpoint(),
            wind_enabled: probe.cookie_bool(cookies::WIND, false),
            ..Self::default()
        }
    }

    /// Copy-on-write update: clone this snapshot, apply `f`, wrap the result.
    ///
    /// The receiver is never touched, so anyone still holding it keeps a
    /// consistent view.
    pub fn updated(self: &Rc<Self>, f: impl FnOnce(&mut ApplicationState)) -> Rc<Self> {
        let mut next = ApplicationState::clone(self);
        f(&mut next);
        Rc::new(next)
    }

    pub fn is_zone_selected(&self) -> bool {
        self.selected_zone_name.is_some()
    }

    /// Where to go when leaving the current page.
    pub fn back_target(&self) -> Page {
        self.page_to_go_back_to.clone().unwrap_or(Page::Map)
    }
}

/// One permitted `(key, value)` pair of `APPLICATION_STATE_UPDATE`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    BundleHash(Option<String>),
    CallerLocation(Option<[f64; 2]>),
    CallerZone(Option<ZoneId>),
    ClientType(ClientType),
    ColorBlindModeEnabled(bool),
    BrightModeEnabled(bool),
    CustomDate(Option<DateTime<Utc>>),
    ElectricityMixMode(ElectricityMixMode),
    IsCordova(bool),
    IsEmbedded(bool),
    IsLeftPanelCollapsed(bool),
    IsMobile(bool),
    IsProduction(bool),
    IsLocalhost(bool),
    LegendVisible(bool),
    Locale(Option<String>),
    OnboardingSeen(bool),
    TooltipDisplayMode(Option<String>),
    SearchQuery(Option<String>),
    SelectedZoneName(Option<ZoneId>),
    SelectedZoneTimeIndex(Option<TimeIndex>),
    PreviousSelectedZoneTimeIndex(Option<TimeIndex>),
    SolarEnabled(bool),
    UseRemoteEndpoint(bool),
    WindEnabled(bool),
    ShowPageState(Page),
    PageToGoBackTo(Option<Page>),
    /// Key without a typed field, kept in `ApplicationState::extras`
    Extra(String, Value),
}

fn decode<T: DeserializeOwned>(key: &str, value: Value, expected: &'static str) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|_| StateError::InvalidValue {
        key: key.to_string(),
        expected,
        value,
    })
}

impl FieldUpdate {
    /// Decode a dynamic `(key, value)` pair coming from the dispatch channel.
    ///
    /// Known keys are type-checked. Unknown keys are accepted as
    /// [`FieldUpdate::Extra`].
    pub fn parse(key: &str, value: Value) -> Result<Self> {
        const BOOL: &str = "a boolean";
        const STRING: &str = "a string or null";
        const INDEX: &str = "a non-negative integer or null";

        let update = match key {
            "bundleHash" => FieldUpdate::BundleHash(decode(key, value, STRING)?),
            "callerLocation" => {
                FieldUpdate::CallerLocation(decode(key, value, "a [lon, lat] pair or null")?)
            }
            "callerZone" => FieldUpdate::CallerZone(decode(key, value, STRING)?),
            "clientType" => {
                FieldUpdate::ClientType(decode(key, value, "\"web\" or \"mobileapp\"")?)
            }
            "colorBlindModeEnabled" => FieldUpdate::ColorBlindModeEnabled(decode(key, value, BOOL)?),
            "brightModeEnabled" => FieldUpdate::BrightModeEnabled(decode(key, value, BOOL)?),
            "customDate" => FieldUpdate::CustomDate(decode(key, value, "an RFC 3339 date or null")?),
            "electricityMixMode" => match value.as_str() {
                Some(mode) => FieldUpdate::ElectricityMixMode(mode.parse()?),
                None => return Err(StateError::InvalidMixMode(value.to_string())),
            },
            "isCordova" => FieldUpdate::IsCordova(decode(key, value, BOOL)?),
            "isEmbedded" => FieldUpdate::IsEmbedded(decode(key, value, BOOL)?),
            "isLeftPanelCollapsed" => FieldUpdate::IsLeftPanelCollapsed(decode(key, value, BOOL)?),
            "isMobile" => FieldUpdate::IsMobile(decode(key, value, BOOL)?),
            "isProduction" => FieldUpdate::IsProduction(decode(key, value, BOOL)?),
            "isLocalhost" => FieldUpdate::IsLocalhost(decode(key, value, BOOL)?),
            "legendVisible" => FieldUpdate::LegendVisible(decode(key, value, BOOL)?),
            "locale" => FieldUpdate::Locale(decode(key, value, STRING)?),
            "onboardingSeen" => FieldUpdate::OnboardingSeen(decode(key, value, BOOL)?),
            "tooltipDisplayMode" => FieldUpdate::TooltipDisplayMode(decode(key, value, STRING)?),
            "searchQuery" => FieldUpdate::SearchQuery(decode(key, value, STRING)?),
            "selectedZoneName" => FieldUpdate::SelectedZoneName(decode(key, value, STRING)?),
            "selectedZoneTimeIndex" => {
                FieldUpdate::SelectedZoneTimeIndex(decode(key, value, INDEX)?)
            }
            "previousSelectedZoneTimeIndex" => {
                FieldUpdate::PreviousSelectedZoneTimeIndex(decode(key, value, INDEX)?)
            }
            "solarEnabled" => FieldUpdate::SolarEnabled(decode(key, value, BOOL)?),
            "useRemoteEndpoint" => FieldUpdate::UseRemoteEndpoint(decode(key, value, BOOL)?),
            "windEnabled" => FieldUpdate::WindEnabled(decode(key, value, BOOL)?),
            "showPageState" => FieldUpdate::ShowPageState(decode(key, value, "a page name")?),
            "pageToGoBackTo" => FieldUpdate::PageToGoBackTo(decode(key, value, STRING)?),
            _ => FieldUpdate::Extra(key.to_string(), value),
        };
        Ok(update)
    }

    /// The wire key this update targets.
    pub fn key(&self) -> &str {
        match self {
            FieldUpdate::BundleHash(_) => "bundleHash",
            FieldUpdate::CallerLocation(_) => "callerLocation",
            FieldUpdate::CallerZone(_) => "callerZone",
            FieldUpdate::ClientType(_) => "clientType",
            FieldUpdate::ColorBlindModeEnabled(_) => "colorBlindModeEnabled",
            FieldUpdate::BrightModeEnabled(_) => "brightModeEnabled",
            FieldUpdate::CustomDate(_) => "customDate",
            FieldUpdate::ElectricityMixMode(_) => "electricityMixMode",
            FieldUpdate::IsCordova(_) => "isCordova",
            FieldUpdate::IsEmbedded(_) => "isEmbedded",
            FieldUpdate::IsLeftPanelCollapsed(_) => "isLeftPanelCollapsed",
            FieldUpdate::IsMobile(_) => "isMobile",
            FieldUpdate::IsProduction(_) => "isProduction",
            FieldUpdate::IsLocalhost(_) => "isLocalhost",
            FieldUpdate::LegendVisible(_) => "legendVisible",
            FieldUpdate::Locale(_) => "locale",
            FieldUpdate::OnboardingSeen(_) => "onboardingSeen",
            FieldUpdate::TooltipDisplayMode(_) => "tooltipDisplayMode",
            FieldUpdate::SearchQuery(_) => "searchQuery",
            FieldUpdate::SelectedZoneName(_) => "selectedZoneName",
            FieldUpdate::SelectedZoneTimeIndex(_) => "selectedZoneTimeIndex",
            FieldUpdate::PreviousSelectedZoneTimeIndex(_) => "previousSelectedZoneTimeIndex",
            FieldUpdate::SolarEnabled(_) => "solarEnabled",
            FieldUpdate::UseRemoteEndpoint(_) => "useRemoteEndpoint",
            FieldUpdate::WindEnabled(_) => "windEnabled",
            FieldUpdate::ShowPageState(_) => "showPageState",
            FieldUpdate::PageToGoBackTo(_) => "pageToGoBackTo",
            FieldUpdate::Extra(key, _) => key,
        }
    }

    fn apply(&self, state: &mut ApplicationState) {
        match self.clone() {
            FieldUpdate::BundleHash(v) => state.bundle_hash = v,
            FieldUpdate::CallerLocation(v) => state.caller_location = v,
            FieldUpdate::CallerZone(v) => state.caller_zone = v,
            FieldUpdate::ClientType(v) => state.client_type = v,
            FieldUpdate::ColorBlindModeEnabled(v) => state.color_blind_mode_enabled = v,
            FieldUpdate::BrightModeEnabled(v) => state.bright_mode_enabled = v,
            FieldUpdate::CustomDate(v) => state.custom_date = v,
            FieldUpdate::ElectricityMixMode(v) => state.electricity_mix_mode = v,
            FieldUpdate::IsCordova(v) => state.is_cordova = v,
            FieldUpdate::IsEmbedded(v) => state.is_embedded = v,
            FieldUpdate::IsLeftPanelCollapsed(v) => state.is_left_panel_collapsed = v,
            FieldUpdate::IsMobile(v) => state.is_mobile = v,
            FieldUpdate::IsProduction(v) => state.is_production = v,
            FieldUpdate::IsLocalhost(v) => state.is_localhost = v,
            FieldUpdate::LegendVisible(v) => state.legend_visible = v,
            FieldUpdate::Locale(v) => state.locale = v,
            FieldUpdate::OnboardingSeen(v) => state.onboarding_seen = v,
            FieldUpdate::TooltipDisplayMode(v) => state.tooltip_display_mode = v,
            FieldUpdate::SearchQuery(v) => state.search_query = v,
            FieldUpdate::SelectedZoneName(v) => state.selected_zone_name = v,
            FieldUpdate::SelectedZoneTimeIndex(v) => state.selected_zone_time_index = v,
            FieldUpdate::PreviousSelectedZoneTimeIndex(v) => {
                state.previous_selected_zone_time_index = v
            }
            FieldUpdate::SolarEnabled(v) => state.solar_enabled = v,
            FieldUpdate::UseRemoteEndpoint(v) => state.use_remote_endpoint = v,
            FieldUpdate::WindEnabled(v) => state.wind_enabled = v,
            FieldUpdate::ShowPageState(v) => state.show_page_state = v,
            FieldUpdate::PageToGoBackTo(v) => state.page_to_go_back_to = v,
            FieldUpdate::Extra(key, v) => {
                state.extras.insert(key, v);
            }
        }
    }
}

/// Compute the next application state.
///
/// Unrecognized actions, and grid snapshots that still contain the selected
/// zone, hand back the same `Rc`.
pub fn reduce(state: &Rc<ApplicationState>, action: &Action) -> Rc<ApplicationState> {
    match action {
        Action::ApplicationStateUpdate(update) => {
            log::debug!("application: update {}", update.key());
            state.updated(|next| {
                // "country" is a drill-down, so it never becomes a return target
                if matches!(update, FieldUpdate::ShowPageState(_))
                    && state.show_page_state != Page::Country
                {
                    next.page_to_go_back_to = Some(state.show_page_state.clone());
                }
                update.apply(next);
            })
        }

        Action::GridData(snapshot) => match &state.selected_zone_name {
            Some(zone) if !snapshot.contains_zone(zone) => {
                let back = state.back_target();
                log::warn!(
                    "application: selected zone {} missing from grid data, returning to {}",
                    zone,
                    back
                );
                state.updated(|next| {
                    next.selected_zone_name = None;
                    next.show_page_state = back;
                })
            }
            _ => Rc::clone(state),
        },

        Action::UpdateSelectedZone { selected_zone_name } => {
            log::debug!("application: select zone {:?}", selected_zone_name);
            state.updated(|next| {
                next.selected_zone_name = selected_zone_name.clone();
                next.selected_zone_time_index = None;
                next.previous_selected_zone_time_index = None;
            })
        }

        Action::UpdateSliderSelectedZoneTime {
            selected_zone_time_index,
        } => state.updated(|next| {
            next.previous_selected_zone_time_index = state.selected_zone_time_index;
            next.selected_zone_time_index = *selected_zone_time_index;
        }),

        Action::Unknown(_) => Rc::clone(state),
    }
}
