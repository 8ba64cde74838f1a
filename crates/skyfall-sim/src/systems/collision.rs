//! Blast-versus-threat collisions, scoring, combos, and chain reactions.

use rand::Rng;

use skyfall_core::constants::{COMBO_MULTIPLIER_CAP, COMBO_WINDOW, KILL_SCORE};
use skyfall_core::entities::{BonusText, Explosion};
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use super::cosmetics::spawn_particles;

pub fn run(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    // Snapshot blast volumes up front so chain explosions spawned here only
    // start dealing damage next tick.
    let blasts: Vec<(Vec2, f64)> = state
        .explosions
        .iter()
        .filter(|e| e.radius > 0.0)
        .map(|e| (e.center, e.radius))
        .collect();
    if blasts.is_empty() {
        return;
    }

    let chain_multiplier = state.upgrades.chain_multiplier();
    let lucky_chance = state.upgrades.lucky_chance();
    let blast_radius = state.upgrades.explosion_radius();

    let mut kills: Vec<usize> = Vec::new();
    for (idx, threat) in state.threats.iter().enumerate() {
        if threat.destroyed {
            continue;
        }
        let pos = threat.position();
        if blasts
            .iter()
            .any(|(center, radius)| pos.distance(*center) < *radius)
        {
            kills.push(idx);
        }
    }

    for idx in kills {
        let pos = state.threats[idx].position();
        let is_decoy = state.threats[idx].variant.is_decoy();
        let threat_id = state.threats[idx].id;
        state.threats[idx].destroyed = true;

        if is_decoy {
            // Decoys fizzle without score, combo, or chain.
            spawn_particles(&mut state.particles, rng, pos, 8);
            state.bonus_text.push(BonusText {
                text: "DECOY!".into(),
                position: pos,
                life: 60,
            });
            continue;
        }

        state.combo_count += 1;
        state.combo_timer = COMBO_WINDOW;
        state.combo_multiplier = u32::min(state.combo_count / 2 + 1, COMBO_MULTIPLIER_CAP);
        state.max_combo = state.max_combo.max(state.combo_count);
        state.run_missiles_destroyed += 1;

        let mut gain = KILL_SCORE;
        if lucky_chance > 0.0 && rng.gen::<f64>() < lucky_chance {
            let lucky = (rng.gen::<f64>() * 4.0).floor() + 2.0;
            gain *= lucky;
            state.bonus_text.push(BonusText {
                text: format!("LUCKY x{lucky}!"),
                position: pos - Vec2::new(0.0, 18.0),
                life: 80,
            });
        }
        gain *= state.combo_multiplier as f64;
        state.score += gain;
        state.credits += gain;

        spawn_particles(&mut state.particles, rng, pos, 12);
        state.bonus_text.push(BonusText {
            text: format!("+{gain} x{}", state.combo_multiplier),
            position: pos,
            life: 60,
        });
        if let Some(text) = combo_milestone(state.combo_count) {
            state.bonus_text.push(BonusText {
                text: text.into(),
                position: Vec2::new(pos.x, pos.y - 30.0),
                life: 100,
            });
        }

        // Every kill seeds a secondary blast; the chain multiplier only
        // scales it, so cascades happen even with no upgrade levels.
        let id = state.alloc_id();
        state.explosions.push(Explosion::ignite(
            id,
            pos,
            blast_radius * chain_multiplier,
            false,
        ));

        events.push(GameEvent::ThreatDestroyed {
            threat_id,
            score: gain,
        });
    }
}

fn combo_milestone(count: u32) -> Option<&'static str> {
    match count {
        4 => Some("COMBO x3!"),
        8 => Some("COMBO x5!"),
        14 => Some("COMBO x8!"),
        18 => Some("MAX COMBO!"),
        _ => None,
    }
}
