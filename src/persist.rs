use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::cache_dir;
use crate::fixtures::{DvpTable, Fixture};
use crate::player::Player;
use crate::state::AppState;

const SNAPSHOT_FILE: &str = "snapshot.json";
const SNAPSHOT_VERSION: u32 = 1;

/// Last good data set, used to paint something before the first fetch lands.
/// Players are stored as the source sent them; favourites, trades and
/// derived fixture or projection values never go in here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    fixtures: Vec<Fixture>,
    #[serde(default)]
    dvp: DvpTable,
    #[serde(default)]
    fetched_at: Option<u64>,
}

pub fn load_into_state(state: &mut AppState) {
    let Some(path) = snapshot_path() else {
        return;
    };
    load_from_path(state, &path);
}

pub fn save_from_state(state: &AppState) {
    let Some(path) = snapshot_path() else {
        return;
    };
    if let Err(err) = save_to_path(state, &path) {
        warn!("snapshot save failed: {err:#}");
    }
}

pub fn load_from_path(state: &mut AppState, path: &Path) -> bool {
    let Ok(raw) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(snapshot) = serde_json::from_str::<SnapshotFile>(&raw) else {
        warn!(path = %path.display(), "snapshot unreadable, ignoring");
        return false;
    };
    if snapshot.version != SNAPSHOT_VERSION {
        return false;
    }
    debug!(players = snapshot.players.len(), "snapshot loaded");
    state.fixtures = snapshot.fixtures;
    state.dvp = snapshot.dvp;
    state.replace_players(
        snapshot
            .players
            .into_iter()
            .map(|mut p| {
                p.is_favorite = false;
                p
            })
            .collect(),
    );
    state.fetched_at = snapshot.fetched_at.and_then(system_time_from_secs);
    true
}

pub fn save_to_path(state: &AppState, path: &Path) -> Result<()> {
    if state.source_players.is_empty() {
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create snapshot dir")?;
    }
    let snapshot = SnapshotFile {
        version: SNAPSHOT_VERSION,
        players: state
            .source_players
            .iter()
            .cloned()
            .map(|mut p| {
                p.is_favorite = false;
                p
            })
            .collect(),
        fixtures: state.fixtures.clone(),
        dvp: state.dvp.clone(),
        fetched_at: state.fetched_at.and_then(system_time_to_secs),
    };
    let json = serde_json::to_string(&snapshot).context("serialize snapshot")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write snapshot")?;
    fs::rename(&tmp, path).context("swap snapshot")?;
    Ok(())
}

fn snapshot_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(SNAPSHOT_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn system_time_from_secs(secs: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_secs(secs))
}
