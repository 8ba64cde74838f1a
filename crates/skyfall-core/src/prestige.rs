//! Prestige bonuses carried across runs and the point-spend table.

use serde::{Deserialize, Serialize};

/// Permanent bonuses bought with prestige points. Applied when a new
/// session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestigeBonuses {
    /// +500 starting score per level.
    pub starting_score: u32,
    /// +2 starting ammo per battery per level.
    pub bonus_ammo: u32,
    /// Cities absorb +1 impact per level.
    pub tough_cities: u32,
    /// Start a run at level 2.
    pub head_start: u32,
    /// Start with Lucky Strike level 1.
    pub lucky_start: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrestigeUpgradeKind {
    StartingScore,
    BonusAmmo,
    ToughCities,
    HeadStart,
    LuckyStart,
}

#[derive(Debug, Clone, Copy)]
pub struct PrestigeUpgradeDef {
    pub kind: PrestigeUpgradeKind,
    pub name: &'static str,
    pub cost: u32,
    pub max_level: u32,
}

pub const PRESTIGE_UPGRADE_DEFS: [PrestigeUpgradeDef; 5] = [
    PrestigeUpgradeDef {
        kind: PrestigeUpgradeKind::StartingScore,
        name: "Seed Fund",
        cost: 3,
        max_level: 5,
    },
    PrestigeUpgradeDef {
        kind: PrestigeUpgradeKind::BonusAmmo,
        name: "Ammo Depot",
        cost: 2,
        max_level: 3,
    },
    PrestigeUpgradeDef {
        kind: PrestigeUpgradeKind::ToughCities,
        name: "Reinforced",
        cost: 5,
        max_level: 2,
    },
    PrestigeUpgradeDef {
        kind: PrestigeUpgradeKind::HeadStart,
        name: "Veteran",
        cost: 4,
        max_level: 1,
    },
    PrestigeUpgradeDef {
        kind: PrestigeUpgradeKind::LuckyStart,
        name: "Born Lucky",
        cost: 3,
        max_level: 1,
    },
];

impl PrestigeBonuses {
    pub fn level(&self, kind: PrestigeUpgradeKind) -> u32 {
        match kind {
            PrestigeUpgradeKind::StartingScore => self.starting_score,
            PrestigeUpgradeKind::BonusAmmo => self.bonus_ammo,
            PrestigeUpgradeKind::ToughCities => self.tough_cities,
            PrestigeUpgradeKind::HeadStart => self.head_start,
            PrestigeUpgradeKind::LuckyStart => self.lucky_start,
        }
    }

    pub fn level_mut(&mut self, kind: PrestigeUpgradeKind) -> &mut u32 {
        match kind {
            PrestigeUpgradeKind::StartingScore => &mut self.starting_score,
            PrestigeUpgradeKind::BonusAmmo => &mut self.bonus_ammo,
            PrestigeUpgradeKind::ToughCities => &mut self.tough_cities,
            PrestigeUpgradeKind::HeadStart => &mut self.head_start,
            PrestigeUpgradeKind::LuckyStart => &mut self.lucky_start,
        }
    }
}

/// Prestige points earned when banking a finished run.
pub fn prestige_points_for(score: f64, level: u32) -> u32 {
    (score / 1000.0).floor() as u32 + level * 2
}
