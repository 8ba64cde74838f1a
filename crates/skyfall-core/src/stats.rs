//! Lifetime statistics persisted across sessions.

use serde::{Deserialize, Serialize};

use crate::prestige::PrestigeBonuses;

/// Aggregate record of every run played. Lives outside [`crate::state::GameState`]
/// and survives new games; the save layer owns its storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentStats {
    pub total_games: u64,
    pub total_score: f64,
    pub high_score: f64,
    pub highest_level: u32,
    pub highest_zone: u32,
    pub total_missiles_destroyed: u64,
    pub total_bosses_defeated: u64,
    pub best_combo: u32,
    pub total_cities_saved: u64,
    pub prestige_level: u32,
    pub prestige_points: u32,
    pub prestige_bonuses: PrestigeBonuses,
    /// Ids of unlocked achievements, in unlock order.
    pub achievements: Vec<String>,
}

impl PersistentStats {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }
}
