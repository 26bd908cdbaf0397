//! The environment the initial application state is derived from.
//!
//! In the browser these values come from `window`, `navigator` and
//! `document.cookie`; [`EnvironmentProbe`] keeps the state crate free of
//! platform globals so it can be built and tested anywhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cookie names of the persisted boolean toggles.
pub mod cookies {
    pub const COLOR_BLIND_MODE: &str = "colorBlindModeEnabled";
    pub const BRIGHT_MODE: &str = "brightModeEnabled";
    pub const ONBOARDING_SEEN: &str = "onboardingSeen";
    pub const SOLAR: &str = "solarEnabled";
    pub const WIND: &str = "windEnabled";
}

/// Host name fragment identifying the production deployment.
pub const PRODUCTION_HOST: &str = "electricitymap";

const MOBILE_USER_AGENTS: [&str; 8] = [
    "android",
    "blackberry",
    "iemobile",
    "ipad",
    "iphone",
    "ipod",
    "opera mini",
    "webos",
];

/// Globals injected into the page by the build or the native shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InjectedGlobals {
    pub bundle_hash: Option<String>,
    pub locale: Option<String>,
    pub is_cordova: bool,
}

/// Read-only view of the host environment, consulted once at startup.
pub trait EnvironmentProbe {
    fn user_agent(&self) -> String;

    fn location_href(&self) -> String;

    fn document_domain(&self) -> String;

    /// True when the page runs inside a frame of another page.
    fn is_embedded(&self) -> bool;

    /// Raw value of a cookie, if set.
    fn cookie(&self, key: &str) -> Option<String>;

    fn injected_globals(&self) -> InjectedGlobals;

    fn ua_is_mobile(&self) -> bool {
        is_mobile_user_agent(&self.user_agent())
    }

    fn is_production(&self) -> bool {
        self.location_href().contains(PRODUCTION_HOST)
    }

    /// Also true for LAN addresses, which are used for on-device testing.
    fn is_localhost(&self) -> bool {
        let href = self.location_href();
        href.contains(PRODUCTION_HOST) || href.contains("192.")
    }

    fn use_remote_endpoint(&self) -> bool {
        self.document_domain().is_empty() || self.is_localhost()
    }

    /// A cookie read as a boolean: `"true"` is true, any other value is
    /// false, and a missing cookie yields `default`.
    fn cookie_bool(&self, key: &str, default: bool) -> bool {
        match self.cookie(key) {
            Some(value) => value == "true",
            None => default,
        }
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_USER_AGENTS.iter().any(|needle| ua.contains(needle))
}

/// Look up `key` in a `document.cookie` style header (`a=1; b=2`).
pub fn parse_cookie_header(header: &str, key: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_string())
}

/// A fixed environment, deserializable from JSON.
///
/// Used by the CLI (`--env environment.json`) and by tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticProbe {
    pub user_agent: String,
    pub location_href: String,
    pub document_domain: String,
    pub is_embedded: bool,
    pub cookies: BTreeMap<String, String>,
    pub globals: InjectedGlobals,
}

impl StaticProbe {
    pub fn with_cookie(mut self, key: &str, value: &str) -> Self {
        self.cookies.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProbe for StaticProbe {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn location_href(&self) -> String {
        self.location_href.clone()
    }

    fn document_domain(&self) -> String {
        self.document_domain.clone()
    }

    fn is_embedded(&self) -> bool {
        self.is_embedded
    }

    fn cookie(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn injected_globals(&self) -> InjectedGlobals {
        self.globals.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36"
        ));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0"
        ));
    }

    #[test]
    fn cookie_bool_defaults_when_missing() {
        let probe = StaticProbe::default()
            .with_cookie("solarEnabled", "true")
            .with_cookie("brightModeEnabled", "false");
        assert!(probe.cookie_bool("solarEnabled", false));
        assert!(!probe.cookie_bool("brightModeEnabled", true));
        assert!(probe.cookie_bool("missing", true));
        assert!(!probe.cookie_bool("missing", false));
    }

    #[test]
    fn host_detection() {
        let probe = StaticProbe {
            location_href: "http://192.168.1.12:8000/".to_string(),
            document_domain: "192.168.1.12".to_string(),
            ..StaticProbe::default()
        };
        assert!(!probe.is_production());
        assert!(probe.is_localhost());
        assert!(probe.use_remote_endpoint());

        let probe = StaticProbe {
            location_href: "http://localhost:8000/".to_string(),
            document_domain: "localhost".to_string(),
            ..StaticProbe::default()
        };
        assert!(!probe.is_localhost());
        assert!(!probe.use_remote_endpoint());

        let file_url = StaticProbe::default();
        assert!(file_url.use_remote_endpoint());
    }

    #[test]
    fn parses_cookie_header() {
        let header = "onboardingSeen=true; windEnabled=false;solarEnabled=true";
        assert_eq!(parse_cookie_header(header, "windEnabled").as_deref(), Some("false"));
        assert_eq!(parse_cookie_header(header, "solarEnabled").as_deref(), Some("true"));
        assert_eq!(parse_cookie_header(header, "wind"), None);
        assert_eq!(parse_cookie_header("", "windEnabled"), None);
    }

    #[test]
    fn static_probe_from_json() {
        let probe: StaticProbe = serde_json::from_str(
            r#"{"userAgent": "iPad", "isEmbedded": true, "cookies": {"windEnabled": "true"}, "globals": {"bundleHash": "abc123", "isCordova": true}}"#,
        )
        .unwrap();
        assert!(probe.ua_is_mobile());
        assert!(probe.is_embedded());
        assert!(probe.cookie_bool("windEnabled", false));
        assert_eq!(probe.globals.bundle_hash.as_deref(), Some("abc123"));
        assert!(probe.globals.is_cordova);
    }
}
