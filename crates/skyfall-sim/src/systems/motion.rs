//! Kinematics for threats, interceptors, and explosions.

use rand::Rng;

use skyfall_core::constants::{
    EXPLOSION_GROW_RATE, EXPLOSION_SHRINK_RATE, FIELD_WIDTH, GROUND_Y, PROGRESS_SCALE,
};
use skyfall_core::entities::{Explosion, ThreatMissile};
use skyfall_core::enums::ThreatVariant;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use super::cosmetics::spawn_particles;

/// Advance every live threat: thaw frozen timers, march progress, steer
/// heat-seekers, and split ripe MIRVs into two faster children.
pub fn run_threats(state: &mut GameState, rng: &mut impl Rng) {
    let city_xs: Vec<f64> = state
        .cities
        .iter()
        .filter(|c| c.alive)
        .map(|c| c.x)
        .collect();
    let mut children: Vec<ThreatMissile> = Vec::new();
    let mut next_id = state.next_id;
    let spawn_targets = state.spawn_targets();

    for m in &mut state.threats {
        if m.destroyed {
            continue;
        }

        if m.frozen {
            m.frozen_timer = m.frozen_timer.saturating_sub(1);
            if m.frozen_timer == 0 {
                m.frozen = false;
            }
        }

        m.progress += m.speed * m.speed_factor() / PROGRESS_SCALE;

        // Heat-seekers drift their impact point toward the nearest living
        // city until late descent.
        if matches!(m.variant, ThreatVariant::HeatSeeker) && m.progress < 0.8 {
            let current_x = m.position().x;
            if let Some(nearest) = city_xs
                .iter()
                .copied()
                .min_by(|a, b| (a - current_x).abs().total_cmp(&(b - current_x).abs()))
            {
                m.target.x += (nearest - m.target.x) * 0.02;
            }
        }

        if let ThreatVariant::Mirv { split, split_at } = m.variant {
            if !split && m.progress >= split_at {
                m.variant = ThreatVariant::Mirv {
                    split: true,
                    split_at,
                };
                let here = m.position();
                for _ in 0..2 {
                    let tx = if spawn_targets.is_empty() {
                        FIELD_WIDTH / 2.0
                    } else {
                        spawn_targets[rng.gen_range(0..spawn_targets.len())]
                    };
                    children.push(ThreatMissile {
                        id: {
                            let id = next_id;
                            next_id += 1;
                            id
                        },
                        start: here + Vec2::new((rng.gen::<f64>() - 0.5) * 20.0, 0.0),
                        target: Vec2::new(tx, GROUND_Y),
                        progress: 0.0,
                        speed: m.speed * 1.1,
                        destroyed: false,
                        variant: ThreatVariant::Plain,
                        frozen: m.frozen,
                        frozen_timer: m.frozen_timer,
                    });
                }
            }
        }
    }

    state.next_id = next_id;
    state.threats.extend(children);
}

/// Advance interceptors; on arrival, detonate a full-size player explosion
/// at the aim point.
pub fn run_interceptors(state: &mut GameState, rng: &mut impl Rng) {
    let blast_radius = state.upgrades.explosion_radius();
    let mut arrivals: Vec<Vec2> = Vec::new();

    for m in &mut state.interceptors {
        if m.arrived {
            continue;
        }
        let dist = m.start.distance(m.target).max(1e-6);
        m.progress += m.speed / dist;
        if m.progress >= 1.0 {
            m.arrived = true;
            arrivals.push(m.target);
        }
    }

    for at in arrivals {
        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, at, blast_radius, true));
        spawn_particles(&mut state.particles, rng, at, 8);
    }
}

/// Grow then shrink every blast wave; alpha tracks the shrink phase.
pub fn run_explosions(state: &mut GameState) {
    for e in &mut state.explosions {
        if e.growing {
            e.radius += EXPLOSION_GROW_RATE;
            if e.radius >= e.max_radius {
                e.growing = false;
            }
        } else {
            e.radius -= EXPLOSION_SHRINK_RATE;
            e.alpha = (e.radius / e.max_radius).max(0.0);
        }
    }
}

/// Close the combo window when its timer runs out.
pub fn run_combo_decay(state: &mut GameState) {
    if state.combo_timer > 0 {
        state.combo_timer -= 1;
        if state.combo_timer == 0 {
            state.combo_count = 0;
            state.combo_multiplier = 1;
        }
    }
}
