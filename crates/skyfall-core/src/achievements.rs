//! Achievement definitions.
//!
//! Checks are pure predicates over the live run and the lifetime stats;
//! the engine evaluates them each tick and records unlocks in
//! [`crate::stats::PersistentStats`].

use crate::state::GameState;
use crate::stats::PersistentStats;

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub check: fn(&GameState, &PersistentStats) -> bool,
}

pub const ACHIEVEMENT_DEFS: [AchievementDef; 12] = [
    AchievementDef {
        id: "first_blood",
        name: "First Blood",
        description: "Destroy your first missile",
        check: |_, stats| stats.total_missiles_destroyed >= 1,
    },
    AchievementDef {
        id: "combo_5",
        name: "Combo Master",
        description: "Get a 5x combo",
        check: |state, _| state.max_combo >= 5,
    },
    AchievementDef {
        id: "combo_10",
        name: "Combo Legend",
        description: "Get a 10x combo",
        check: |state, _| state.max_combo >= 10,
    },
    AchievementDef {
        id: "boss_slayer",
        name: "Boss Slayer",
        description: "Defeat a boss",
        check: |_, stats| stats.total_bosses_defeated >= 1,
    },
    AchievementDef {
        id: "boss_trio",
        name: "Triple Threat",
        description: "Defeat 3 bosses",
        check: |_, stats| stats.total_bosses_defeated >= 3,
    },
    AchievementDef {
        id: "zone_2",
        name: "Explorer",
        description: "Reach Zone 2",
        check: |_, stats| stats.highest_zone >= 2,
    },
    AchievementDef {
        id: "zone_5",
        name: "World Traveler",
        description: "Reach Zone 5",
        check: |_, stats| stats.highest_zone >= 5,
    },
    AchievementDef {
        id: "score_10k",
        name: "Big Earner",
        description: "Score 10,000 in one run",
        check: |state, _| state.score >= 10_000.0,
    },
    AchievementDef {
        id: "score_100k",
        name: "Millionaire",
        description: "Score 100,000 in one run",
        check: |state, _| state.score >= 100_000.0,
    },
    AchievementDef {
        id: "perfect_level",
        name: "Untouchable",
        description: "Complete a level with all cities",
        check: |state, _| state.level_complete && state.cities_alive() == 6,
    },
    AchievementDef {
        id: "weapon_master",
        name: "Weapon Master",
        description: "Use all 3 special weapons",
        check: |state, _| {
            state.special_weapons.len() >= 3
                && state
                    .special_weapons
                    .iter()
                    .all(|w| w.max_charges > 0 && w.charges < w.max_charges)
        },
    },
    AchievementDef {
        id: "prestige_1",
        name: "Reborn",
        description: "Prestige for the first time",
        check: |_, stats| stats.prestige_level >= 1,
    },
];

/// Newly unlocked achievements given the current run and stats, in
/// definition order. Does not mutate; the caller records unlocks.
pub fn newly_unlocked(
    state: &GameState,
    stats: &PersistentStats,
) -> Vec<&'static AchievementDef> {
    ACHIEVEMENT_DEFS
        .iter()
        .filter(|def| !stats.has_achievement(def.id) && (def.check)(state, stats))
        .collect()
}
