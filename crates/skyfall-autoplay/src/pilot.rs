//! The autopilot driver.
//!
//! Called once per tick with a read-only view of the game state; returns
//! the commands to queue before the next tick. All effects go through the
//! regular command surface so autopilot runs are replayable.

use log::debug;

use skyfall_core::commands::PlayerCommand;
use skyfall_core::economy::BUILDING_DEFS;
use skyfall_core::enums::Phase;
use skyfall_core::prestige::PrestigeBonuses;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_core::upgrades::{upgrade_cost, UpgradeKind};

use crate::targeting::find_best_target;

/// Purchase order in the shop. Offense and economy first, utility last;
/// repairs are slotted in but gated on an actual dead city.
const UPGRADE_PRIORITY: [UpgradeKind; 10] = [
    UpgradeKind::BlastRadius,
    UpgradeKind::ExtraAmmo,
    UpgradeKind::MissileSpeed,
    UpgradeKind::ChainReaction,
    UpgradeKind::MultiShot,
    UpgradeKind::ShieldGenerator,
    UpgradeKind::AutoTurret,
    UpgradeKind::EmpBurst,
    UpgradeKind::LuckyStrike,
    UpgradeKind::CityRepair,
];

/// Ticks to linger on the game-over screen before restarting.
const RESTART_DELAY: u32 = 120;
/// Ticks to let the zone banner show before skipping it.
const INTRO_SKIP_DELAY: u32 = 90;
/// Ticks between purchase attempts in the shop.
const SHOP_BUY_INTERVAL: u32 = 15;
/// Failed purchase attempts before leaving the shop.
const SHOP_IDLE_LIMIT: u32 = 8;

pub struct AutoPilot {
    /// Prestige bonuses to re-apply when restarting after a game over.
    bonuses: PrestigeBonuses,
    fire_timer: u32,
    scan_timer: u32,
    restart_timer: u32,
    intro_timer: u32,
    shop_buy_timer: u32,
    shop_idle: u32,
    /// Smoothed crosshair position, for rendering. Fire decisions use the
    /// freshly scanned target, not this.
    pub aim: Vec2,
}

impl AutoPilot {
    pub fn new(bonuses: PrestigeBonuses) -> Self {
        Self {
            bonuses,
            fire_timer: 0,
            scan_timer: 0,
            restart_timer: 0,
            intro_timer: 0,
            shop_buy_timer: 0,
            shop_idle: 0,
            aim: GameState::field_center(),
        }
    }

    /// Advance the pilot one tick and return commands to queue.
    pub fn update(&mut self, state: &GameState) -> Vec<PlayerCommand> {
        match state.phase {
            Phase::Title => vec![PlayerCommand::StartGame],
            Phase::GameOver => self.update_game_over(),
            Phase::ZoneIntro => self.update_zone_intro(),
            Phase::Shop => self.update_shop(state),
            Phase::Playing => self.update_playing(state),
        }
    }

    fn update_game_over(&mut self) -> Vec<PlayerCommand> {
        self.restart_timer += 1;
        if self.restart_timer > RESTART_DELAY {
            self.restart_timer = 0;
            debug!("autopilot restarting run");
            return vec![PlayerCommand::NewGame {
                bonuses: self.bonuses,
            }];
        }
        Vec::new()
    }

    fn update_zone_intro(&mut self) -> Vec<PlayerCommand> {
        self.intro_timer += 1;
        if self.intro_timer > INTRO_SKIP_DELAY {
            self.intro_timer = 0;
            return vec![PlayerCommand::SkipIntro];
        }
        Vec::new()
    }

    fn update_shop(&mut self, state: &GameState) -> Vec<PlayerCommand> {
        self.shop_buy_timer += 1;
        if self.shop_buy_timer > SHOP_BUY_INTERVAL {
            self.shop_buy_timer = 0;
            if let Some(command) = self.pick_purchase(state) {
                self.shop_idle = 0;
                return vec![command];
            }
            self.shop_idle += 1;
        }
        if self.shop_idle > SHOP_IDLE_LIMIT {
            self.shop_idle = 0;
            self.shop_buy_timer = 0;
            return vec![PlayerCommand::AdvanceLevel];
        }
        Vec::new()
    }

    /// Highest-priority upgrade that is affordable after keeping a cash
    /// reserve, falling back to the cheapest income building.
    fn pick_purchase(&self, state: &GameState) -> Option<PlayerCommand> {
        for kind in UPGRADE_PRIORITY {
            let def = kind.def();
            let level = state.upgrades.level(kind);
            if level >= def.max_level {
                continue;
            }
            if kind == UpgradeKind::CityRepair {
                if state.cities.iter().all(|c| c.alive) {
                    continue;
                }
                let cost = upgrade_cost(def, level);
                if state.credits < cost {
                    continue;
                }
                return Some(PlayerCommand::BuyUpgrade { kind });
            }
            let cost = upgrade_cost(def, level);
            // Keep a reserve, but never skip a bargain.
            let reserve = f64::max(200.0, state.credits * 0.2);
            if state.credits - cost < reserve && state.credits > cost * 2.0 {
                continue;
            }
            if state.credits < cost {
                continue;
            }
            debug!("autopilot buying upgrade {kind:?} for {cost}");
            return Some(PlayerCommand::BuyUpgrade { kind });
        }

        let cheapest = BUILDING_DEFS
            .iter()
            .map(|def| (def.kind, state.buildings.next_cost(def.kind)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if state.credits - cheapest.1 >= f64::max(200.0, state.credits * 0.2) {
            return Some(PlayerCommand::BuyBuilding { kind: cheapest.0 });
        }
        None
    }

    fn update_playing(&mut self, state: &GameState) -> Vec<PlayerCommand> {
        if state.level_complete {
            return Vec::new();
        }

        self.fire_timer += 1;
        self.scan_timer += 1;

        if self.scan_timer >= 5 {
            self.scan_timer = 0;
            if let Some(target) = find_best_target(state) {
                self.aim += (target - self.aim) * 0.3;
            }
        }

        let threat_count = state.threats.iter().filter(|m| !m.destroyed).count();
        let boss_threat = usize::from(state.boss.is_some() && !state.boss_defeated);
        let total_threats = threat_count + state.asteroids.len() + boss_threat;

        // Fire faster under saturation.
        let fire_interval = match total_threats {
            t if t > 10 => 6,
            t if t > 5 => 10,
            t if t > 2 => 15,
            _ => 25,
        };

        if self.fire_timer >= fire_interval && total_threats > 0 {
            self.fire_timer = 0;
            let has_ammo = state
                .batteries
                .iter()
                .any(|b| b.ammo > 0 && b.disabled == 0);
            if has_ammo {
                if let Some(target) = find_best_target(state) {
                    return vec![PlayerCommand::FireAt {
                        x: target.x,
                        y: target.y,
                    }];
                }
            }
        }
        Vec::new()
    }
}
