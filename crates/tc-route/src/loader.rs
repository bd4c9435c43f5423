//! CSV layout loader.
//!
//! # CSV format
//!
//! One row per checkpoint, shared checkpoint, or switch setting.  Row order
//! within an agent is the travel order of its loop.
//!
//! ```csv
//! agent_id,kind,id,value
//! 0,checkpoint,25,
//! 0,checkpoint,24,
//! 0,shared,24,
//! 0,switch,16,diverted
//! ```
//!
//! **`kind`** field:
//!
//! | Value        | Meaning                                          |
//! |--------------|--------------------------------------------------|
//! | `checkpoint` | `id` is the next checkpoint of the loop          |
//! | `shared`     | `id` is the next checkpoint of the shared run    |
//! | `switch`     | `id` is a switch, `value` is `straight`/`diverted` |
//!
//! Every agent present in the file gets one validated [`RouteModel`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::{AgentId, CheckpointId, SwitchId, SwitchPosition};

use crate::route::{RouteModel, SwitchSetting};
use crate::{RouteError, RouteResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LayoutRecord {
    agent_id: u32,
    kind:     String,
    id:       u32,
    value:    Option<String>,
}

#[derive(Default)]
struct PendingLayout {
    checkpoints: Vec<CheckpointId>,
    shared:      Vec<CheckpointId>,
    switches:    Vec<SwitchSetting>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-agent routes from a CSV file.
pub fn load_layout_csv(path: &Path) -> RouteResult<BTreeMap<AgentId, RouteModel>> {
    let file = std::fs::File::open(path)?;
    load_layout_reader(file)
}

/// Like [`load_layout_csv`] but accepts any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R) -> RouteResult<BTreeMap<AgentId, RouteModel>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: BTreeMap<AgentId, PendingLayout> = BTreeMap::new();

    for result in csv_reader.deserialize::<LayoutRecord>() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        let layout = by_agent.entry(AgentId(row.agent_id)).or_default();
        match row.kind.trim() {
            "checkpoint" => layout.checkpoints.push(CheckpointId(row.id)),
            "shared"     => layout.shared.push(CheckpointId(row.id)),
            "switch"     => layout.switches.push(SwitchSetting::new(
                SwitchId(row.id),
                parse_position(row.value.as_deref())?,
            )),
            other => {
                return Err(RouteError::Parse(format!(
                    "invalid kind {other:?}: expected \"checkpoint\", \"shared\", or \"switch\""
                )));
            }
        }
    }

    by_agent
        .into_iter()
        .map(|(agent, layout)| {
            let route = RouteModel::new(layout.checkpoints, layout.shared, layout.switches)?;
            log::debug!("loaded route for {agent}: lap end {}", route.lap_end());
            Ok((agent, route))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_position(value: Option<&str>) -> RouteResult<SwitchPosition> {
    match value.map(str::trim) {
        Some("straight") => Ok(SwitchPosition::Straight),
        Some("diverted") => Ok(SwitchPosition::Diverted),
        other => Err(RouteError::Parse(format!(
            "invalid switch position {other:?}: expected \"straight\" or \"diverted\""
        ))),
    }
}
