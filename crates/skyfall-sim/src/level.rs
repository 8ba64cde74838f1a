//! Per-level difficulty parameters and level lifecycle.

use rand::Rng;

use skyfall_core::constants::{BOSS_LEVEL_INTERVAL, FIRST_SPAWN_DELAY};
use skyfall_core::entities::Boss;
use skyfall_core::enums::{BossKind, Phase};
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_core::zones::zone_for;

/// Difficulty knobs for one level, derived from the level number and its
/// zone multipliers. Chances below their ramp-in level come out negative,
/// which a uniform roll can never satisfy.
#[derive(Debug, Clone, Copy)]
pub struct LevelConfig {
    pub total_threats: u32,
    pub threat_speed: f64,
    pub spawn_interval: f64,
    pub mirv_chance: f64,
    pub cluster_chance: f64,
    pub heat_seeker_chance: f64,
    pub decoy_chance: f64,
    pub emp_chance: f64,
}

pub fn level_config(level: u32) -> LevelConfig {
    let zone = zone_for(level);
    let lf = level as f64;
    let zone_start = zone.levels.0 as f64;
    let base_threats = f64::min(8.0 + lf * 3.0, 50.0);
    LevelConfig {
        total_threats: (base_threats * zone.spawn_multiplier).floor() as u32,
        threat_speed: f64::min(0.3 + lf * 0.08, 2.2) * zone.speed_multiplier,
        spawn_interval: f64::max(80.0 - lf * 4.0, 12.0),
        mirv_chance: f64::min((lf - 3.0) * 0.08, 0.45),
        cluster_chance: f64::min((lf - 2.0) * 0.05, 0.35),
        heat_seeker_chance: if zone.has_heat_seekers {
            f64::min(0.1 + (lf - zone_start) * 0.06, 0.4)
        } else {
            0.0
        },
        decoy_chance: if zone.has_decoys {
            f64::min(0.08 + (lf - zone_start) * 0.04, 0.25)
        } else {
            0.0
        },
        emp_chance: if zone.has_emp_threats {
            f64::min(0.05 + (lf - zone_start) * 0.03, 0.2)
        } else {
            0.0
        },
    }
}

pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

fn create_boss(state: &mut GameState) -> Boss {
    let level = state.level;
    let base_hp = (150 + level * 30) as i32;
    Boss {
        id: state.alloc_id(),
        position: Vec2::new(skyfall_core::constants::FIELD_WIDTH / 2.0, 60.0),
        hp: base_hp,
        max_hp: base_hp,
        kind: BossKind::for_level(level),
        attack_timer: 120,
        move_dir: 1.0,
        speed: 0.8 + level as f64 * 0.05,
        flash_timer: 0,
    }
}

/// Advance to the next level and reset all per-level state. This is the
/// only place the level number increases during play.
pub fn start_next_level(state: &mut GameState, rng: &mut impl Rng) {
    state.level += 1;
    state.phase = Phase::Playing;
    state.level_complete = false;
    state.spawned_this_level = 0;

    let config = level_config(state.level);
    // Boss levels carry a reduced threat quota.
    state.total_this_level = if is_boss_level(state.level) {
        (config.total_threats as f64 * 0.6).floor() as u32
    } else {
        config.total_threats
    };
    state.spawn_timer = FIRST_SPAWN_DELAY;

    let max_ammo = state.upgrades.ammo_per_battery();
    for b in &mut state.batteries {
        b.ammo = max_ammo;
        b.max_ammo = max_ammo;
        b.disabled = 0;
    }

    state.shield_hits = vec![0; state.cities.len()];
    state.emp_active = state.upgrades.emp_burst_duration();
    state.auto_turret_timer = 0;
    state.threats.clear();
    state.interceptors.clear();
    state.explosions.clear();
    state.bombers.clear();
    state.asteroids.clear();
    state.mines.clear();
    state.lasers.clear();
    state.bomber_spawn_timer = 200.0 + rng.gen::<f64>() * 300.0;
    state.asteroid_spawn_timer = 300.0 + rng.gen::<f64>() * 400.0;
    state.eruption_timer = 200.0 + rng.gen::<f64>() * 300.0;

    if is_boss_level(state.level) {
        state.boss = Some(create_boss(state));
        state.is_boss_level = true;
    } else {
        state.boss = None;
        state.is_boss_level = false;
    }
    state.boss_defeated = false;

    state.recharge_weapons();

    state.combo_count = 0;
    state.combo_timer = 0;
    state.combo_multiplier = 1;
}

/// Seed the very first level's timers when leaving the title screen. The
/// initial quota of 10 threats set at session init is kept as-is.
pub fn begin_first_level(state: &mut GameState) {
    state.phase = Phase::Playing;
    state.spawn_timer = FIRST_SPAWN_DELAY;
    state.bomber_spawn_timer = 300.0;
    state.asteroid_spawn_timer = 400.0;
    state.eruption_timer = 300.0;
}
