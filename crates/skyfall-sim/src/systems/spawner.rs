//! Threat wave spawning.

use rand::Rng;

use skyfall_core::constants::{FIELD_WIDTH, GROUND_Y};
use skyfall_core::entities::ThreatMissile;
use skyfall_core::enums::ThreatVariant;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use crate::level::level_config;

/// Roll one fresh threat aimed at a random living city or battery.
///
/// Variant rolls are mutually exclusive, in priority order: MIRV beats
/// heat-seeker beats decoy beats EMP. Decoys fly 30% faster to sell the act.
pub fn spawn_threat(state: &mut GameState, rng: &mut impl Rng) -> ThreatMissile {
    let config = level_config(state.level);
    let targets = state.spawn_targets();
    let target_x = if targets.is_empty() {
        FIELD_WIDTH / 2.0
    } else {
        targets[rng.gen_range(0..targets.len())]
    };

    let is_mirv = rng.gen::<f64>() < config.mirv_chance;
    let is_heat_seeker = !is_mirv && rng.gen::<f64>() < config.heat_seeker_chance;
    let is_decoy = !is_mirv && !is_heat_seeker && rng.gen::<f64>() < config.decoy_chance;
    let is_emp = !is_mirv && !is_heat_seeker && !is_decoy && rng.gen::<f64>() < config.emp_chance;

    let variant = if is_mirv {
        ThreatVariant::Mirv {
            split: false,
            split_at: 0.4 + rng.gen::<f64>() * 0.2,
        }
    } else if is_heat_seeker {
        ThreatVariant::HeatSeeker
    } else if is_decoy {
        ThreatVariant::Decoy
    } else if is_emp {
        ThreatVariant::Emp
    } else {
        ThreatVariant::Plain
    };

    let decoy_haste = if is_decoy { 1.3 } else { 1.0 };
    ThreatMissile {
        id: state.alloc_id(),
        start: Vec2::new(rng.gen::<f64>() * (FIELD_WIDTH - 100.0) + 50.0, -10.0),
        target: Vec2::new(target_x, GROUND_Y),
        progress: 0.0,
        speed: config.threat_speed * (0.8 + rng.gen::<f64>() * 0.4) * decoy_haste,
        destroyed: false,
        variant,
        frozen: false,
        frozen_timer: 0,
    }
}

/// Count down the spawn timer and release the next threat (or a cluster of
/// up to 3) while the level quota remains. Threats spawned under an active
/// EMP burst start frozen for its remaining duration.
pub fn run(state: &mut GameState, rng: &mut impl Rng) {
    if state.spawned_this_level >= state.total_this_level {
        return;
    }
    state.spawn_timer -= 1.0;
    if state.spawn_timer > 0.0 {
        return;
    }

    let config = level_config(state.level);
    let is_cluster = rng.gen::<f64>() < config.cluster_chance;
    let count = if is_cluster {
        u32::min(3, state.total_this_level - state.spawned_this_level)
    } else {
        1
    };
    for _ in 0..count {
        let mut threat = spawn_threat(state, rng);
        if state.emp_active > 0 {
            threat.frozen = true;
            threat.frozen_timer = state.emp_active;
        }
        state.threats.push(threat);
        state.spawned_this_level += 1;
    }
    state.spawn_timer = config.spawn_interval + rng.gen::<f64>() * 30.0;
}
