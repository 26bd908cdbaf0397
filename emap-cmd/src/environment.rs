//! Loading the environment description used to seed the initial state.

use anyhow::Context;
use emap_state::StaticProbe;
use log::info;

/// Load a `StaticProbe` from a JSON file, or the default desktop-web
/// environment when no file is given.
pub fn load_probe(path: Option<&str>) -> anyhow::Result<StaticProbe> {
    let Some(path) = path else {
        info!("No environment file given, using defaults");
        return Ok(StaticProbe::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read environment file {}", path))?;
    parse_probe(&contents).with_context(|| format!("invalid environment file {}", path))
}

pub fn parse_probe(json: &str) -> anyhow::Result<StaticProbe> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_state::EnvironmentProbe;

    #[test]
    fn missing_path_uses_defaults() {
        let probe = load_probe(None).unwrap();
        assert_eq!(probe, StaticProbe::default());
    }

    #[test]
    fn parses_environment_json() {
        let probe = parse_probe(
            r#"{"locationHref": "https://www.electricitymap.org/", "cookies": {"onboardingSeen": "true"}}"#,
        )
        .unwrap();
        assert!(probe.is_production());
        assert!(probe.cookie_bool("onboardingSeen", false));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = load_probe(Some("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read environment file"));
    }
}
