//! File-backed storage for the session save and the lifetime stats
//! record, plus the stats-layer operations that close out a run.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use skyfall_core::prestige::{prestige_points_for, PrestigeUpgradeKind, PRESTIGE_UPGRADE_DEFS};
use skyfall_core::state::GameState;
use skyfall_core::stats::PersistentStats;
use skyfall_core::zones::zone_index;

use crate::codec::{decode_save, encode_save};

fn session_path(dir: &Path) -> PathBuf {
    dir.join("session.json")
}

fn stats_path(dir: &Path) -> PathBuf {
    dir.join("stats.json")
}

pub fn save_session(dir: &Path, state: &GameState) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create save directory: {e}"))?;
    let blob = encode_save(state)?;
    fs::write(session_path(dir), blob).map_err(|e| format!("Failed to write session save: {e}"))
}

/// Load the session save, if a readable and current one exists.
pub fn load_session(dir: &Path) -> Option<GameState> {
    let blob = fs::read_to_string(session_path(dir)).ok()?;
    decode_save(&blob)
}

pub fn delete_session(dir: &Path) -> Result<(), String> {
    let path = session_path(dir);
    if path.exists() {
        fs::remove_file(&path).map_err(|e| format!("Failed to delete session save: {e}"))?;
    }
    Ok(())
}

pub fn save_stats(dir: &Path, stats: &PersistentStats) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create save directory: {e}"))?;
    let json = serde_json::to_string_pretty(stats)
        .map_err(|e| format!("Failed to serialize stats: {e}"))?;
    fs::write(stats_path(dir), json).map_err(|e| format!("Failed to write stats: {e}"))
}

/// Load lifetime stats. Missing or unreadable records start fresh;
/// `#[serde(default)]` on the record fills fields older versions lack.
pub fn load_stats(dir: &Path) -> PersistentStats {
    let path = stats_path(dir);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(_) => return PersistentStats::default(),
    };
    match serde_json::from_str(&json) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("resetting unreadable stats record: {e}");
            PersistentStats::default()
        }
    }
}

/// Fold a finished run into the lifetime record. Autopilot runs are
/// exhibition only and leave the record untouched.
pub fn record_run(stats: &mut PersistentStats, state: &GameState) {
    if state.auto_mode {
        return;
    }
    stats.total_games += 1;
    stats.total_score += state.score;
    stats.high_score = stats.high_score.max(state.score);
    stats.highest_level = stats.highest_level.max(state.level);
    stats.highest_zone = stats.highest_zone.max(zone_index(state.level) as u32 + 1);
    stats.total_missiles_destroyed += state.run_missiles_destroyed;
    stats.total_bosses_defeated += state.run_bosses_defeated;
    stats.total_cities_saved += state.run_cities_saved;
    stats.best_combo = stats.best_combo.max(state.max_combo);
}

/// Points the run would bank, or `None` when it does not qualify.
pub fn prestige_offer(state: &GameState) -> Option<u32> {
    if state.level < 5 {
        return None;
    }
    let points = prestige_points_for(state.score, state.level);
    (points > 0).then_some(points)
}

/// Bank a qualifying run as prestige. Returns the points earned.
pub fn bank_prestige(stats: &mut PersistentStats, state: &GameState) -> Option<u32> {
    let points = prestige_offer(state)?;
    stats.prestige_level += 1;
    stats.prestige_points += points;
    info!(
        "banked prestige run: +{points} points at prestige level {}",
        stats.prestige_level
    );
    Some(points)
}

/// Spend banked points on a permanent bonus. Returns false when the
/// upgrade is maxed or unaffordable.
pub fn buy_prestige_upgrade(stats: &mut PersistentStats, kind: PrestigeUpgradeKind) -> bool {
    let Some(def) = PRESTIGE_UPGRADE_DEFS.iter().find(|d| d.kind == kind) else {
        return false;
    };
    let level = stats.prestige_bonuses.level(kind);
    if level >= def.max_level || stats.prestige_points < def.cost {
        return false;
    }
    stats.prestige_points -= def.cost;
    *stats.prestige_bonuses.level_mut(kind) += 1;
    true
}
