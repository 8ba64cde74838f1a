//! Combat upgrade table and the values derived from upgrade levels.

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_AMMO, BASE_EXPLOSION_RADIUS, BASE_INTERCEPTOR_SPEED};

/// The thirteen purchasable combat upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    BlastRadius,
    MissileSpeed,
    ExtraAmmo,
    ChainReaction,
    LuckyStrike,
    MultiShot,
    EmpBurst,
    AutoTurret,
    ShieldGenerator,
    CityRepair,
    LaserWeapon,
    SwarmWeapon,
    MineWeapon,
}

/// Static definition of one upgrade's shop entry and cost curve.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeDef {
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub max_level: u32,
    pub base_cost: f64,
    pub cost_scale: f64,
}

pub const UPGRADE_DEFS: [UpgradeDef; 13] = [
    UpgradeDef {
        kind: UpgradeKind::BlastRadius,
        name: "Blast Radius",
        max_level: 5,
        base_cost: 120.0,
        cost_scale: 1.5,
    },
    UpgradeDef {
        kind: UpgradeKind::MissileSpeed,
        name: "Missile Velocity",
        max_level: 5,
        base_cost: 100.0,
        cost_scale: 1.4,
    },
    UpgradeDef {
        kind: UpgradeKind::ExtraAmmo,
        name: "Ammo Cache",
        max_level: 5,
        base_cost: 80.0,
        cost_scale: 1.3,
    },
    UpgradeDef {
        kind: UpgradeKind::ChainReaction,
        name: "Chain Reaction",
        max_level: 5,
        base_cost: 180.0,
        cost_scale: 1.6,
    },
    UpgradeDef {
        kind: UpgradeKind::LuckyStrike,
        name: "Lucky Strike",
        max_level: 5,
        base_cost: 150.0,
        cost_scale: 1.4,
    },
    UpgradeDef {
        kind: UpgradeKind::MultiShot,
        name: "Multi-Shot",
        max_level: 3,
        base_cost: 1000.0,
        cost_scale: 2.2,
    },
    UpgradeDef {
        kind: UpgradeKind::EmpBurst,
        name: "EMP Burst",
        max_level: 3,
        base_cost: 500.0,
        cost_scale: 1.6,
    },
    UpgradeDef {
        kind: UpgradeKind::AutoTurret,
        name: "Auto Turret",
        max_level: 3,
        base_cost: 1500.0,
        cost_scale: 1.8,
    },
    UpgradeDef {
        kind: UpgradeKind::ShieldGenerator,
        name: "Shield Generator",
        max_level: 3,
        base_cost: 800.0,
        cost_scale: 2.0,
    },
    UpgradeDef {
        kind: UpgradeKind::CityRepair,
        name: "City Repair",
        max_level: 3,
        base_cost: 300.0,
        cost_scale: 2.0,
    },
    UpgradeDef {
        kind: UpgradeKind::LaserWeapon,
        name: "Laser Beam",
        max_level: 3,
        base_cost: 300.0,
        cost_scale: 1.8,
    },
    UpgradeDef {
        kind: UpgradeKind::SwarmWeapon,
        name: "Missile Swarm",
        max_level: 3,
        base_cost: 250.0,
        cost_scale: 1.6,
    },
    UpgradeDef {
        kind: UpgradeKind::MineWeapon,
        name: "Area Mine",
        max_level: 3,
        base_cost: 200.0,
        cost_scale: 1.5,
    },
];

impl UpgradeKind {
    pub fn def(&self) -> &'static UpgradeDef {
        UPGRADE_DEFS
            .iter()
            .find(|d| d.kind == *self)
            .expect("every UpgradeKind has a table entry")
    }
}

/// Cost of the next level given the current one. Geometric curve,
/// floored to whole credits.
pub fn upgrade_cost(def: &UpgradeDef, current_level: u32) -> f64 {
    (def.base_cost * def.cost_scale.powi(current_level as i32)).floor()
}

/// Current levels of every upgrade. Persist across levels within a session;
/// reset only on a full new game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub blast_radius: u32,
    pub missile_speed: u32,
    pub extra_ammo: u32,
    pub chain_reaction: u32,
    pub lucky_strike: u32,
    pub multi_shot: u32,
    pub emp_burst: u32,
    pub auto_turret: u32,
    pub shield_generator: u32,
    pub city_repair: u32,
    pub laser_weapon: u32,
    pub swarm_weapon: u32,
    pub mine_weapon: u32,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::BlastRadius => self.blast_radius,
            UpgradeKind::MissileSpeed => self.missile_speed,
            UpgradeKind::ExtraAmmo => self.extra_ammo,
            UpgradeKind::ChainReaction => self.chain_reaction,
            UpgradeKind::LuckyStrike => self.lucky_strike,
            UpgradeKind::MultiShot => self.multi_shot,
            UpgradeKind::EmpBurst => self.emp_burst,
            UpgradeKind::AutoTurret => self.auto_turret,
            UpgradeKind::ShieldGenerator => self.shield_generator,
            UpgradeKind::CityRepair => self.city_repair,
            UpgradeKind::LaserWeapon => self.laser_weapon,
            UpgradeKind::SwarmWeapon => self.swarm_weapon,
            UpgradeKind::MineWeapon => self.mine_weapon,
        }
    }

    pub fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::BlastRadius => &mut self.blast_radius,
            UpgradeKind::MissileSpeed => &mut self.missile_speed,
            UpgradeKind::ExtraAmmo => &mut self.extra_ammo,
            UpgradeKind::ChainReaction => &mut self.chain_reaction,
            UpgradeKind::LuckyStrike => &mut self.lucky_strike,
            UpgradeKind::MultiShot => &mut self.multi_shot,
            UpgradeKind::EmpBurst => &mut self.emp_burst,
            UpgradeKind::AutoTurret => &mut self.auto_turret,
            UpgradeKind::ShieldGenerator => &mut self.shield_generator,
            UpgradeKind::CityRepair => &mut self.city_repair,
            UpgradeKind::LaserWeapon => &mut self.laser_weapon,
            UpgradeKind::SwarmWeapon => &mut self.swarm_weapon,
            UpgradeKind::MineWeapon => &mut self.mine_weapon,
        }
    }

    // --- Derived combat values ---

    /// Interceptor explosion radius.
    pub fn explosion_radius(&self) -> f64 {
        BASE_EXPLOSION_RADIUS + self.blast_radius as f64 * 10.0
    }

    /// Interceptor speed in pixels per tick.
    pub fn interceptor_speed(&self) -> f64 {
        BASE_INTERCEPTOR_SPEED + self.missile_speed as f64 * 1.2
    }

    /// Ammo loaded into each battery at level start.
    pub fn ammo_per_battery(&self) -> u32 {
        BASE_AMMO + self.extra_ammo * 3
    }

    /// Radius multiplier for chain-reaction explosions.
    pub fn chain_multiplier(&self) -> f64 {
        0.6 + self.chain_reaction as f64 * 0.12
    }

    /// Interceptors launched per fire action.
    pub fn multishot_count(&self) -> u32 {
        1 + self.multi_shot
    }

    /// Ticks the wave-start EMP freeze lasts.
    pub fn emp_burst_duration(&self) -> u32 {
        self.emp_burst * 180
    }

    /// Auto-turret fire interval in ticks; 0 means the turret is absent.
    pub fn auto_turret_interval(&self) -> u32 {
        if self.auto_turret == 0 {
            0
        } else {
            (180u32.saturating_sub(self.auto_turret * 40)).max(60)
        }
    }

    /// Impacts each city shield can absorb per level.
    pub fn shield_max_hits(&self) -> u32 {
        self.shield_generator
    }

    /// Chance per kill of a 2x-5x lucky bonus.
    pub fn lucky_chance(&self) -> f64 {
        self.lucky_strike as f64 * 0.08
    }
}
