//! What analytics sinks read from the application state.
//!
//! The tracking vendor itself is outside this crate; a sink only has to
//! accept named events with a JSON payload.

use crate::application::{ApplicationState, ClientType};
use crate::ZoneId;
use serde::Serialize;
use serde_json::Value;

/// Custom dimensions attached to every tracked event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDimensions {
    pub client_type: ClientType,
    pub color_blind_mode_enabled: bool,
    pub bright_mode_enabled: bool,
    pub is_cordova: bool,
    pub is_embedded: bool,
    pub solar_enabled: bool,
    pub wind_enabled: bool,
    /// Referrer of the embedding page; only set when embedded
    pub embedded_uri: Option<String>,
    pub selected_zone_name: Option<ZoneId>,
}

impl TrackingDimensions {
    pub fn from_state(state: &ApplicationState, referrer: Option<&str>) -> Self {
        Self {
            client_type: state.client_type,
            color_blind_mode_enabled: state.color_blind_mode_enabled,
            bright_mode_enabled: state.bright_mode_enabled,
            is_cordova: state.is_cordova,
            is_embedded: state.is_embedded,
            solar_enabled: state.solar_enabled,
            wind_enabled: state.wind_enabled,
            embedded_uri: referrer
                .filter(|_| state.is_embedded)
                .map(str::to_string),
            selected_zone_name: state.selected_zone_name.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Destination for tracking events.
pub trait AnalyticsSink {
    fn track(&mut self, event: &str, data: &Value);

    fn timing(&mut self, name: &str, duration_ms: u64) {
        self.track(
            "timing_complete",
            &serde_json::json!({ "name": name, "value": duration_ms }),
        );
    }
}

/// Track a `pageview` of the current page, tagged with the dimensions.
pub fn page_view<S: AnalyticsSink + ?Sized>(
    sink: &mut S,
    state: &ApplicationState,
    referrer: Option<&str>,
) {
    let mut data = TrackingDimensions::from_state(state, referrer).to_json();
    if let Value::Object(map) = &mut data {
        map.insert(
            "showPageState".to_string(),
            Value::String(state.show_page_state.to_string()),
        );
    }
    sink.track("pageview", &data);
}

/// Sink that writes events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn track(&mut self, event: &str, data: &Value) {
        log::info!("[analytics] {} {}", event, data);
    }
}
