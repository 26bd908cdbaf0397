//! Replay a log of dispatched actions through the root reducer.
//!
//! The log is JSON lines, one wire action per line. Blank lines and lines
//! starting with `#` are skipped. Each applied action prints one JSON record
//! with the line number, the action type, whether the root snapshot changed
//! and the resulting state.

use anyhow::Context;
use emap_state::{Action, EnvironmentProbe, RawAction, RootState, Store};
use log::{info, warn};
use serde::Serialize;
use std::io::{BufRead, BufReader, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    pub final_only: bool,
    pub keep_going: bool,
}

/// Counts of what happened during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub unchanged: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
struct ReplayRecord<'a> {
    line: usize,
    #[serde(rename = "type")]
    action_type: &'a str,
    changed: bool,
    state: &'a RootState,
}

/// Print the initial root state for `probe` as pretty JSON.
pub fn print_initial(probe: &impl EnvironmentProbe) -> anyhow::Result<()> {
    let store = Store::from_probe(probe);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, store.state())?;
    writeln!(out)?;
    Ok(())
}

/// Replay the action log at `path` (`-` for stdin) and print to stdout.
pub fn run_replay(
    path: &str,
    probe: &impl EnvironmentProbe,
    options: ReplayOptions,
) -> anyhow::Result<()> {
    let mut store = Store::from_probe(probe);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = if path == "-" {
        replay(&mut store, std::io::stdin().lock(), &mut out, options)?
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open action log {}", path))?;
        replay(&mut store, BufReader::new(file), &mut out, options)?
    };

    info!(
        "Replay complete: {} applied ({} unchanged), {} rejected",
        summary.applied, summary.unchanged, summary.rejected
    );
    Ok(())
}

/// Feed every action in `reader` to `store`, writing records to `writer`.
pub fn replay<R: BufRead, W: Write>(
    store: &mut Store,
    reader: R,
    writer: &mut W,
    options: ReplayOptions,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let decoded = serde_json::from_str::<RawAction>(trimmed)
            .map_err(anyhow::Error::from)
            .and_then(|raw| Action::try_from(raw).map_err(anyhow::Error::from));
        let action = match decoded {
            Ok(action) => action,
            Err(e) if options.keep_going => {
                warn!("line {}: rejected action: {}", line_no, e);
                summary.rejected += 1;
                continue;
            }
            Err(e) => return Err(e.context(format!("line {}: rejected action", line_no))),
        };

        let before = store.state().clone();
        let after = store.dispatch(&action);
        let changed = !after.ptr_eq(&before);
        summary.applied += 1;
        if !changed {
            summary.unchanged += 1;
        }

        if !options.final_only {
            let record = ReplayRecord {
                line: line_no,
                action_type: action.type_name(),
                changed,
                state: after,
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
    }

    if options.final_only {
        serde_json::to_writer_pretty(&mut *writer, store.state())?;
        writeln!(writer)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emap_state::ApplicationState;
    use serde_json::Value;
    use std::io::Cursor;

    const SESSION: &str = r#"
# select a zone and drill down
{"type": "UPDATE_SELECTED_ZONE", "payload": {"selectedZoneName": "DE"}}
{"type": "APPLICATION_STATE_UPDATE", "key": "showPageState", "value": "country"}
{"type": "SOME_OTHER_ACTION"}
{"type": "GRID_DATA", "payload": {"countries": {"FR": {}}}}
"#;

    fn run(input: &str, options: ReplayOptions) -> (anyhow::Result<ReplaySummary>, String) {
        let mut store = Store::new(ApplicationState::default());
        let mut out = Vec::new();
        let result = replay(&mut store, Cursor::new(input), &mut out, options);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn replays_session_line_by_line() {
        let (result, out) = run(SESSION, ReplayOptions::default());
        let summary = result.unwrap();
        assert_eq!(
            summary,
            ReplaySummary {
                applied: 4,
                unchanged: 1,
                rejected: 0
            }
        );

        let records: Vec<Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["line"], 3);
        assert_eq!(records[2]["type"], "SOME_OTHER_ACTION");
        assert_eq!(records[2]["changed"], false);

        let last = &records[3]["state"]["application"];
        assert_eq!(last["selectedZoneName"], Value::Null);
        assert_eq!(last["showPageState"], "map");
        assert_eq!(last["pageToGoBackTo"], "map");
    }

    #[test]
    fn final_only_prints_one_state() {
        let (result, out) = run(
            SESSION,
            ReplayOptions {
                final_only: true,
                keep_going: false,
            },
        );
        result.unwrap();
        let state: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(state["data"]["gridUpdates"], 1);
    }

    #[test]
    fn invalid_mix_mode_stops_replay() {
        let input = r#"{"type": "APPLICATION_STATE_UPDATE", "key": "legendVisible", "value": true}
{"type": "APPLICATION_STATE_UPDATE", "key": "electricityMixMode", "value": "X"}
{"type": "APPLICATION_STATE_UPDATE", "key": "legendVisible", "value": false}"#;
        let (result, out) = run(input, ReplayOptions::default());
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown electricityMixMode \"X\""));
        assert!(format!("{:#}", err).contains("line 2"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn keep_going_skips_rejected_actions() {
        let input = r#"{"type": "APPLICATION_STATE_UPDATE", "key": "electricityMixMode", "value": "X"}
not json at all
{"type": "APPLICATION_STATE_UPDATE", "key": "electricityMixMode", "value": "production"}"#;
        let (result, out) = run(
            input,
            ReplayOptions {
                final_only: false,
                keep_going: true,
            },
        );
        let summary = result.unwrap();
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.applied, 1);
        let record: Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(
            record["state"]["application"]["electricityMixMode"],
            "production"
        );
    }
}
