//! Simulation engine: owns the game state, the seeded RNG, and the
//! command queue, and advances everything one fixed tick at a time.
//!
//! `SimulationEngine` owns the full `GameState`, processes player commands,
//! and runs all per-tick systems in a fixed order. Completely headless,
//! enabling deterministic testing: the same seed and command sequence
//! always produce the same state.

use std::collections::VecDeque;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skyfall_core::achievements::newly_unlocked;
use skyfall_core::commands::PlayerCommand;
use skyfall_core::constants::ZONE_INTRO_TICKS;
use skyfall_core::economy::BuildingKind;
use skyfall_core::entities::Toast;
use skyfall_core::enums::{Phase, WeaponKind};
use skyfall_core::events::GameEvent;
use skyfall_core::prestige::PrestigeBonuses;
use skyfall_core::state::GameState;
use skyfall_core::stats::PersistentStats;
use skyfall_core::types::Vec2;
use skyfall_core::upgrades::{upgrade_cost, UpgradeKind};
use skyfall_core::zones::zone_for;

use crate::level;
use crate::systems;
use crate::systems::weapons;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the game state and the session RNG.
pub struct SimulationEngine {
    state: GameState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine with no prestige bonuses.
    pub fn new(config: SimConfig) -> Self {
        Self::with_bonuses(config, &PrestigeBonuses::default())
    }

    /// Create a new engine with prestige bonuses applied to the session.
    pub fn with_bonuses(config: SimConfig, bonuses: &PrestigeBonuses) -> Self {
        Self {
            state: GameState::new_session(bonuses),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the events it emitted.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        self.process_commands();

        match self.state.phase {
            Phase::Playing => self.tick_playing(),
            Phase::ZoneIntro => {
                self.state.zone_intro_timer -= 1;
                if self.state.zone_intro_timer <= 0 {
                    self.state.phase = Phase::Shop;
                }
            }
            Phase::Title | Phase::Shop | Phase::GameOver => {}
        }

        self.state.tick += 1;
        std::mem::take(&mut self.events)
    }

    /// Get a read-only reference to the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get a mutable reference to the game state (for tests and save restore).
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Check this tick's state against the achievement table, record any new
    /// unlocks in `stats`, and surface them as toasts and events.
    pub fn apply_achievements(&mut self, stats: &mut PersistentStats) {
        let unlocked = newly_unlocked(&self.state, stats);
        for def in unlocked {
            stats.achievements.push(def.id.to_string());
            self.state.toasts.push(Toast {
                text: format!("{}: {}", def.name, def.description),
                timer: 180,
            });
            self.events.push(GameEvent::AchievementUnlocked {
                id: def.id.to_string(),
            });
        }
    }

    /// One tick of active combat, in fixed sub-phase order.
    fn tick_playing(&mut self) {
        let state = &mut self.state;
        let rng = &mut self.rng;
        let events = &mut self.events;

        systems::economy::run(state);

        state.emp_active = state.emp_active.saturating_sub(1);
        for b in &mut state.batteries {
            b.disabled = b.disabled.saturating_sub(1);
        }

        if state.level_complete {
            state.level_transition_timer -= 1;
            if state.level_transition_timer <= 0 {
                state.level_complete = false;
                let current_zone = zone_for(state.level).id;
                let next_zone = zone_for(state.level + 1).id;
                if next_zone != current_zone {
                    // Zone boundary: the level number does not advance until
                    // the player leaves the shop.
                    info!("zone {current_zone} cleared, entering zone {next_zone} intro");
                    state.previous_zone_id = current_zone;
                    state.phase = Phase::ZoneIntro;
                    state.zone_intro_timer = ZONE_INTRO_TICKS as i32;
                } else {
                    level::start_next_level(state, rng);
                    Self::emit_boss_spawned(state, events);
                }
            }
            // Cosmetics keep settling through the countdown.
            systems::cosmetics::run(state);
            return;
        }

        systems::spawner::run(state, rng);
        systems::hazards::run(state, rng, events);
        systems::auto_turret::run(state, events);
        systems::motion::run_threats(state, rng);
        systems::motion::run_interceptors(state, rng);
        systems::motion::run_explosions(state);
        systems::motion::run_combo_decay(state);
        systems::boss::run(state, rng, events);
        weapons::run_mines(state, rng);
        weapons::run_lasers(state, rng, events);
        systems::collision::run(state, rng, events);
        systems::impacts::run(state, rng, events);
        systems::cosmetics::run(state);
        systems::cleanup::run(state, events);
    }

    fn emit_boss_spawned(state: &GameState, events: &mut Vec<GameEvent>) {
        if let Some(boss) = &state.boss {
            debug!("level {} boss: {:?} with {} hp", state.level, boss.kind, boss.hp);
            events.push(GameEvent::BossSpawned {
                kind: boss.kind,
                hp: boss.hp,
            });
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::FireAt { x, y } => self.handle_fire(Vec2::new(x, y)),
            PlayerCommand::SelectWeapon { kind } => {
                if self.state.phase != Phase::Playing {
                    return;
                }
                if self.state.selected_weapon == Some(kind) {
                    self.state.selected_weapon = None;
                } else if self
                    .state
                    .weapon_slot(kind)
                    .is_some_and(|slot| slot.charges > 0)
                {
                    self.state.selected_weapon = Some(kind);
                }
            }
            PlayerCommand::CycleWeapon => self.cycle_weapon(),
            PlayerCommand::CancelWeapon => {
                self.state.selected_weapon = None;
            }
            PlayerCommand::BuyUpgrade { kind } => self.buy_upgrade(kind),
            PlayerCommand::BuyBuilding { kind } => self.buy_building(kind),
            PlayerCommand::StartGame => {
                if self.state.phase == Phase::Title {
                    level::begin_first_level(&mut self.state);
                }
            }
            PlayerCommand::NewGame { bonuses } => {
                let auto_mode = self.state.auto_mode;
                let high_score = self.state.high_score;
                self.state = GameState::new_session(&bonuses);
                self.state.auto_mode = auto_mode;
                self.state.high_score = high_score;
            }
            PlayerCommand::SkipIntro => {
                if self.state.phase == Phase::ZoneIntro {
                    self.state.zone_intro_timer = 0;
                    self.state.phase = Phase::Shop;
                }
            }
            PlayerCommand::AdvanceLevel => {
                if self.state.phase == Phase::Shop {
                    level::start_next_level(&mut self.state, &mut self.rng);
                    Self::emit_boss_spawned(&self.state, &mut self.events);
                }
            }
            PlayerCommand::ToggleAutoplay => {
                self.state.auto_mode = !self.state.auto_mode;
            }
            PlayerCommand::SkipToLevel { level } => {
                if level >= 1 {
                    self.state.level = level - 1;
                    level::start_next_level(&mut self.state, &mut self.rng);
                    Self::emit_boss_spawned(&self.state, &mut self.events);
                }
            }
            PlayerCommand::GrantCredits { amount } => {
                self.state.credits += amount;
            }
        }
    }

    /// Fire at a point: discharge the armed weapon, or launch interceptors
    /// with multishot spread. One ammo is consumed per fire action no matter
    /// how many interceptors the spread adds.
    fn handle_fire(&mut self, at: Vec2) {
        if self.state.phase != Phase::Playing || self.state.level_complete || self.state.game_over {
            return;
        }

        if let Some(kind) = self.state.selected_weapon {
            weapons::discharge(&mut self.state, &mut self.rng, &mut self.events, kind, at);
            return;
        }

        let shots = self.state.upgrades.multishot_count();
        for i in 0..shots {
            let offset = if i == 0 {
                0.0
            } else {
                (self.rng.gen::<f64>() - 0.5) * 40.0
            };
            let target = Vec2::new(at.x + offset, at.y);
            if !weapons::fire_interceptor(&mut self.state, &mut self.events, target, i == 0) {
                break;
            }
        }
    }

    fn cycle_weapon(&mut self) {
        if self.state.phase != Phase::Playing {
            return;
        }
        let start = match self.state.selected_weapon {
            Some(kind) => WeaponKind::ALL
                .iter()
                .position(|k| *k == kind)
                .map(|i| i + 1)
                .unwrap_or(0),
            None => 0,
        };
        for offset in 0..WeaponKind::ALL.len() {
            let kind = WeaponKind::ALL[(start + offset) % WeaponKind::ALL.len()];
            if self
                .state
                .weapon_slot(kind)
                .is_some_and(|slot| slot.charges > 0)
            {
                self.state.selected_weapon = Some(kind);
                return;
            }
        }
        self.state.selected_weapon = None;
    }

    fn buy_upgrade(&mut self, kind: UpgradeKind) {
        if matches!(self.state.phase, Phase::Title | Phase::GameOver) {
            return;
        }
        let def = kind.def();
        let level = self.state.upgrades.level(kind);
        if level >= def.max_level {
            return;
        }
        // Repairs only make sense with a city down.
        if kind == UpgradeKind::CityRepair && self.state.cities.iter().all(|c| c.alive) {
            return;
        }
        let cost = upgrade_cost(def, level);
        if self.state.credits < cost {
            return;
        }
        self.state.credits -= cost;
        self.state.total_spent += cost;
        *self.state.upgrades.level_mut(kind) += 1;

        if kind == UpgradeKind::CityRepair {
            if let Some(ci) = self.state.cities.iter().position(|c| !c.alive) {
                self.state.cities[ci].alive = true;
                self.state.shield_hits[ci] = 0;
            }
        }
    }

    fn buy_building(&mut self, kind: BuildingKind) {
        if matches!(self.state.phase, Phase::Title | Phase::GameOver) {
            return;
        }
        let cost = self.state.buildings.next_cost(kind);
        if self.state.credits < cost {
            return;
        }
        self.state.credits -= cost;
        self.state.total_spent += cost;
        *self.state.buildings.count_mut(kind) += 1;
    }
}
