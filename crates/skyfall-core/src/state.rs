//! The complete simulation state.
//!
//! `GameState` is the single source of truth: it serializes losslessly, so a
//! decode of an encoded state resumes the exact run. Anything derivable
//! (income rate, zone, level config) is recomputed, not stored, with the
//! exception of `income_rate` which is refreshed every tick for display.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BATTERY_POSITIONS, BASE_AMMO, CITY_POSITIONS, FIELD_WIDTH, GROUND_Y,
};
use crate::economy::Buildings;
use crate::entities::{
    Asteroid, Battery, Bomber, BonusText, Boss, City, Explosion, Interceptor, LaserBeam, Mine,
    Particle, SpecialWeapon, ThreatMissile, Toast,
};
use crate::enums::{Phase, WeaponKind};
use crate::prestige::PrestigeBonuses;
use crate::upgrades::Upgrades;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Ticks elapsed since the session began, across all phases.
    pub tick: u64,

    // Economy
    pub credits: f64,
    pub score: f64,
    /// Credits per second from buildings, refreshed each tick.
    pub income_rate: f64,
    pub buildings: Buildings,
    pub total_spent: f64,

    // Progression
    pub level: u32,
    pub phase: Phase,
    pub game_over: bool,
    pub level_complete: bool,
    pub level_transition_timer: i32,
    pub zone_intro_timer: i32,
    pub previous_zone_id: u32,
    pub high_score: f64,

    // Ground installations
    pub cities: Vec<City>,
    pub batteries: Vec<Battery>,
    /// Absorbed impacts per city this level, paired by index with `cities`.
    pub shield_hits: Vec<u32>,
    /// Extra impacts every city shield can absorb, from prestige bonuses.
    pub city_armor: u32,

    // Airborne entities
    pub threats: Vec<ThreatMissile>,
    pub interceptors: Vec<Interceptor>,
    pub explosions: Vec<Explosion>,
    pub bombers: Vec<Bomber>,
    pub asteroids: Vec<Asteroid>,
    pub boss: Option<Boss>,
    pub boss_defeated: bool,
    pub is_boss_level: bool,

    // Wave bookkeeping
    pub spawn_timer: f64,
    pub spawned_this_level: u32,
    pub total_this_level: u32,
    pub bomber_spawn_timer: f64,
    pub asteroid_spawn_timer: f64,
    pub eruption_timer: f64,
    /// Remaining ticks of an active eruption burst.
    pub eruption_active: u32,

    // Player systems
    pub upgrades: Upgrades,
    pub auto_turret_timer: u32,
    /// Remaining ticks of the wave-opening EMP freeze.
    pub emp_active: u32,
    pub special_weapons: Vec<SpecialWeapon>,
    pub selected_weapon: Option<WeaponKind>,
    pub mines: Vec<Mine>,
    pub lasers: Vec<LaserBeam>,
    pub auto_mode: bool,

    // Combo
    pub combo_count: u32,
    pub combo_timer: u32,
    pub combo_multiplier: u32,
    pub max_combo: u32,

    // Run tracking for achievements and stats banking
    pub run_missiles_destroyed: u64,
    pub run_bosses_defeated: u64,
    /// Cities still standing at each level completion, summed over the run.
    pub run_cities_saved: u64,
    pub weapons_used_this_level: Vec<WeaponKind>,

    // Cosmetics
    pub particles: Vec<Particle>,
    pub bonus_text: Vec<BonusText>,
    pub toasts: Vec<Toast>,
    pub screen_shake: f64,

    /// Next entity id. Resynced after load so restored runs never reuse a
    /// live id.
    pub next_id: u32,
}

fn init_cities() -> Vec<City> {
    CITY_POSITIONS
        .iter()
        .map(|&x| City { x, alive: true })
        .collect()
}

fn init_batteries(max_ammo: u32) -> Vec<Battery> {
    BATTERY_POSITIONS
        .iter()
        .map(|&x| Battery {
            x,
            y: GROUND_Y,
            ammo: max_ammo,
            max_ammo,
            disabled: 0,
        })
        .collect()
}

fn init_special_weapons(upgrades: &Upgrades) -> Vec<SpecialWeapon> {
    vec![
        SpecialWeapon {
            kind: WeaponKind::Laser,
            charges: upgrades.laser_weapon,
            max_charges: upgrades.laser_weapon,
        },
        SpecialWeapon {
            kind: WeaponKind::Swarm,
            charges: upgrades.swarm_weapon * 2,
            max_charges: upgrades.swarm_weapon * 2,
        },
        SpecialWeapon {
            kind: WeaponKind::Mine,
            charges: upgrades.mine_weapon * 3,
            max_charges: upgrades.mine_weapon * 3,
        },
    ]
}

impl GameState {
    /// Fresh session on the title screen, with prestige bonuses applied.
    pub fn new_session(prestige: &PrestigeBonuses) -> GameState {
        let mut upgrades = Upgrades::default();
        if prestige.lucky_start > 0 {
            upgrades.lucky_strike = upgrades.lucky_strike.max(1);
        }
        let start_level = if prestige.head_start > 0 { 2 } else { 1 };
        let max_ammo = BASE_AMMO + prestige.bonus_ammo * 2;

        GameState {
            tick: 0,
            credits: 0.0,
            score: prestige.starting_score as f64 * 500.0,
            income_rate: 0.0,
            buildings: Buildings::default(),
            total_spent: 0.0,
            level: start_level,
            phase: Phase::Title,
            game_over: false,
            level_complete: false,
            level_transition_timer: 0,
            zone_intro_timer: 0,
            previous_zone_id: 0,
            high_score: 0.0,
            cities: init_cities(),
            batteries: init_batteries(max_ammo),
            shield_hits: vec![0; CITY_POSITIONS.len()],
            city_armor: prestige.tough_cities,
            threats: Vec::new(),
            interceptors: Vec::new(),
            explosions: Vec::new(),
            bombers: Vec::new(),
            asteroids: Vec::new(),
            boss: None,
            boss_defeated: false,
            is_boss_level: false,
            spawn_timer: 0.0,
            spawned_this_level: 0,
            total_this_level: 10,
            bomber_spawn_timer: 0.0,
            asteroid_spawn_timer: 0.0,
            eruption_timer: 0.0,
            eruption_active: 0,
            upgrades,
            auto_turret_timer: 0,
            emp_active: 0,
            special_weapons: init_special_weapons(&upgrades),
            selected_weapon: None,
            mines: Vec::new(),
            lasers: Vec::new(),
            auto_mode: false,
            combo_count: 0,
            combo_timer: 0,
            combo_multiplier: 1,
            max_combo: 0,
            run_missiles_destroyed: 0,
            run_cities_saved: 0,
            run_bosses_defeated: 0,
            weapons_used_this_level: Vec::new(),
            particles: Vec::new(),
            bonus_text: Vec::new(),
            toasts: Vec::new(),
            screen_shake: 0.0,
            next_id: 1,
        }
    }

    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Bump `next_id` past every live entity id. Run after decoding a save
    /// so restored runs never hand out an id twice.
    pub fn resync_ids(&mut self) {
        let max_live = self
            .threats
            .iter()
            .map(|m| m.id)
            .chain(self.interceptors.iter().map(|m| m.id))
            .chain(self.explosions.iter().map(|e| e.id))
            .chain(self.bombers.iter().map(|b| b.id))
            .chain(self.asteroids.iter().map(|a| a.id))
            .chain(self.mines.iter().map(|m| m.id))
            .chain(self.lasers.iter().map(|l| l.id))
            .chain(self.boss.iter().map(|b| b.id))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_live + 1);
    }

    pub fn cities_alive(&self) -> usize {
        self.cities.iter().filter(|c| c.alive).count()
    }

    /// Impact targets the spawner may aim at: living cities plus batteries.
    pub fn spawn_targets(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .cities
            .iter()
            .filter(|c| c.alive)
            .map(|c| c.x)
            .collect();
        xs.extend(self.batteries.iter().map(|b| b.x));
        xs
    }

    pub fn weapon_slot(&self, kind: WeaponKind) -> Option<&SpecialWeapon> {
        self.special_weapons.iter().find(|w| w.kind == kind)
    }

    pub fn weapon_slot_mut(&mut self, kind: WeaponKind) -> Option<&mut SpecialWeapon> {
        self.special_weapons.iter_mut().find(|w| w.kind == kind)
    }

    pub fn mark_weapon_used(&mut self, kind: WeaponKind) {
        if !self.weapons_used_this_level.contains(&kind) {
            self.weapons_used_this_level.push(kind);
        }
    }

    /// Shield capacity per city this level, upgrades plus prestige armor.
    pub fn shield_capacity(&self) -> u32 {
        let base = self.upgrades.shield_max_hits();
        if base > 0 || self.city_armor > 0 {
            base + self.city_armor
        } else {
            0
        }
    }

    /// Reload special weapon charges from current upgrade levels. Called on
    /// level start.
    pub fn recharge_weapons(&mut self) {
        self.special_weapons = init_special_weapons(&self.upgrades);
        self.selected_weapon = None;
        self.weapons_used_this_level.clear();
    }

    /// Default aim position at screen center, used before any cursor input.
    pub fn field_center() -> crate::types::Vec2 {
        crate::types::Vec2::new(FIELD_WIDTH / 2.0, crate::constants::FIELD_HEIGHT / 2.0)
    }
}
