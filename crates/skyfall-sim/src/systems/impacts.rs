//! Ground impacts and damage to cities and batteries.

use rand::Rng;

use skyfall_core::constants::{
    BASE_EXPLOSION_RADIUS, BATTERY_HIT_RADIUS, CITY_HIT_RADIUS, EMP_DISABLE_TICKS, GROUND_Y,
};
use skyfall_core::entities::{BonusText, Explosion};
use skyfall_core::enums::ThreatVariant;
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use super::cosmetics::spawn_particles;

/// One impact against city `ci`: the shield absorbs it while capacity
/// remains, otherwise the city is destroyed.
pub fn apply_city_hit(
    state: &mut GameState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
    ci: usize,
) {
    let capacity = state.shield_capacity();
    if capacity > 0 && state.shield_hits[ci] < capacity {
        state.shield_hits[ci] += 1;
        let cx = state.cities[ci].x;
        state.bonus_text.push(BonusText {
            text: "SHIELD!".to_string(),
            position: Vec2::new(cx, GROUND_Y - 50.0),
            life: 60,
        });
        events.push(GameEvent::ShieldAbsorbed { city: ci });
    } else {
        state.cities[ci].alive = false;
        let cx = state.cities[ci].x;
        spawn_particles(&mut state.particles, rng, Vec2::new(cx, GROUND_Y - 15.0), 25);
        events.push(GameEvent::CityDestroyed { city: ci });
    }
}

/// Resolve threats whose progress reached the ground. Decoys fizzle, EMP
/// strikes knock out the nearest battery without destructive effect, and
/// everything else detonates against nearby cities and batteries.
pub fn run(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    for i in 0..state.threats.len() {
        if state.threats[i].destroyed || state.threats[i].progress < 1.0 {
            continue;
        }
        state.threats[i].destroyed = true;
        let impact = state.threats[i].target;
        let variant = state.threats[i].variant;

        if variant.is_decoy() {
            spawn_particles(&mut state.particles, rng, impact, 8);
            state.bonus_text.push(BonusText {
                text: "DECOY!".to_string(),
                position: impact - Vec2::new(0.0, 20.0),
                life: 60,
            });
            continue;
        }

        if variant.is_emp() {
            let nearest = state
                .batteries
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (a.x - impact.x)
                        .abs()
                        .total_cmp(&(b.x - impact.x).abs())
                })
                .map(|(bi, _)| bi);
            if let Some(bi) = nearest {
                state.batteries[bi].disabled = EMP_DISABLE_TICKS;
                events.push(GameEvent::BatteryDisabled { battery: bi });
            }
            spawn_particles(&mut state.particles, rng, impact, 20);
            state.bonus_text.push(BonusText {
                text: "EMP!".to_string(),
                position: impact - Vec2::new(0.0, 20.0),
                life: 90,
            });
            state.screen_shake = 6.0;
            let id = state.alloc_id();
            state
                .explosions
                .push(Explosion::ignite(id, impact, 40.0, false));
            continue;
        }

        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, impact, BASE_EXPLOSION_RADIUS * 0.7, false));
        state.screen_shake = 8.0;
        spawn_particles(&mut state.particles, rng, impact, 15);

        let mut hit_city = None;
        for ci in 0..state.cities.len() {
            if !state.cities[ci].alive {
                continue;
            }
            if (state.cities[ci].x - impact.x).abs() < CITY_HIT_RADIUS {
                hit_city = Some(ci);
                apply_city_hit(state, rng, events, ci);
            }
        }
        events.push(GameEvent::GroundImpact {
            x: impact.x,
            city: hit_city,
        });

        // Near misses on a battery scatter its ammo stockpile. The autopilot
        // ignores ammo entirely, so the penalty only applies to manual play.
        if !state.auto_mode {
            for b in &mut state.batteries {
                if (b.x - impact.x).abs() < BATTERY_HIT_RADIUS {
                    b.ammo = 0;
                }
            }
        }
    }
}
