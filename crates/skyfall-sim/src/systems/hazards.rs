//! Zone hazards: bombers, volcanic eruptions, asteroids.

use rand::Rng;

use skyfall_core::constants::{ASTEROID_SCORE, FIELD_HEIGHT, FIELD_WIDTH, GROUND_Y};
use skyfall_core::entities::{Asteroid, Bomber, BonusText, Explosion, ThreatMissile};
use skyfall_core::enums::ThreatVariant;
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_core::zones::zone_for;

use super::cosmetics::spawn_particles;
use super::impacts::apply_city_hit;
use crate::level::level_config;

pub fn run(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let zone = *zone_for(state.level);

    // --- Bombers ---
    if zone.has_bombers {
        state.bomber_spawn_timer -= 1.0;
        if state.bomber_spawn_timer <= 0.0 {
            state.bomber_spawn_timer = 600.0 + rng.gen::<f64>() * 400.0;
            let dir = if rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 };
            let drop_interval = 60.0 + rng.gen::<f64>() * 40.0;
            let bomber = Bomber {
                id: state.alloc_id(),
                x: if dir > 0.0 { -60.0 } else { FIELD_WIDTH + 60.0 },
                y: 50.0 + rng.gen::<f64>() * 80.0,
                speed: 1.2 + rng.gen::<f64>() * 0.8,
                direction: dir,
                drops_remaining: 3 + rng.gen_range(0..3),
                drop_timer: 60.0 + rng.gen::<f64>() * 40.0,
                drop_interval,
            };
            state.bombers.push(bomber);
        }
    }

    // Bomber motion and missile drops.
    let config = level_config(state.level);
    for bi in 0..state.bombers.len() {
        state.bombers[bi].x += state.bombers[bi].speed * state.bombers[bi].direction;
        state.bombers[bi].drop_timer -= 1.0;
        if state.bombers[bi].drop_timer <= 0.0 && state.bombers[bi].drops_remaining > 0 {
            state.bombers[bi].drops_remaining -= 1;
            state.bombers[bi].drop_timer = state.bombers[bi].drop_interval;

            let targets: Vec<f64> = state
                .cities
                .iter()
                .filter(|c| c.alive)
                .map(|c| c.x)
                .collect();
            let tx = if targets.is_empty() {
                FIELD_WIDTH / 2.0
            } else {
                targets[rng.gen_range(0..targets.len())]
            };
            let (bx, by) = (state.bombers[bi].x, state.bombers[bi].y);
            let threat = ThreatMissile {
                id: state.alloc_id(),
                start: Vec2::new(bx, by),
                target: Vec2::new(tx, GROUND_Y),
                progress: 0.0,
                speed: config.threat_speed * 1.2,
                destroyed: false,
                variant: ThreatVariant::Plain,
                frozen: false,
                frozen_timer: 0,
            };
            state.threats.push(threat);
            spawn_particles(&mut state.particles, rng, Vec2::new(bx, by + 10.0), 4);
        }
    }
    state.bombers.retain(|b| {
        (b.direction > 0.0 && b.x < FIELD_WIDTH + 100.0)
            || (b.direction < 0.0 && b.x > -100.0)
    });

    // --- Eruptions ---
    if zone.has_eruptions {
        state.eruption_timer -= 1.0;
        if state.eruption_timer <= 0.0 {
            state.eruption_timer = 300.0 + rng.gen::<f64>() * 500.0;
            state.eruption_active = 60;
            state.screen_shake = 12.0;
            let erupt_x = rng.gen::<f64>() * FIELD_WIDTH;
            spawn_particles(&mut state.particles, rng, Vec2::new(erupt_x, GROUND_Y), 45);
        }
        state.eruption_active = state.eruption_active.saturating_sub(1);
    }

    // --- Asteroids ---
    if zone.has_asteroids {
        state.asteroid_spawn_timer -= 1.0;
        if state.asteroid_spawn_timer <= 0.0 {
            state.asteroid_spawn_timer = 400.0 + rng.gen::<f64>() * 600.0;
            let from_left = rng.gen::<f64>() > 0.5;
            let dir = if from_left { 1.0 } else { -1.0 };
            let asteroid = Asteroid {
                id: state.alloc_id(),
                position: Vec2::new(
                    if from_left { -30.0 } else { FIELD_WIDTH + 30.0 },
                    rng.gen::<f64>() * 200.0 + 50.0,
                ),
                velocity: Vec2::new(
                    dir * (0.8 + rng.gen::<f64>() * 1.5),
                    0.3 + rng.gen::<f64>() * 0.8,
                ),
                radius: 15.0 + rng.gen::<f64>() * 20.0,
                hp: 2 + rng.gen_range(0..3),
            };
            state.asteroids.push(asteroid);
        }
    }

    for a in &mut state.asteroids {
        let v = a.velocity;
        a.position += v;
    }

    // Explosions chip asteroids; shattering pays out.
    let blasts: Vec<(Vec2, f64)> = state
        .explosions
        .iter()
        .filter(|e| e.radius > 0.0)
        .map(|e| (e.center, e.radius))
        .collect();
    for (center, radius) in blasts {
        for i in 0..state.asteroids.len() {
            let a = &state.asteroids[i];
            if a.radius <= 0.0 {
                continue;
            }
            if a.position.distance(center) < radius + a.radius {
                let at = state.asteroids[i].position;
                state.asteroids[i].hp -= 1;
                if state.asteroids[i].hp <= 0 {
                    state.score += ASTEROID_SCORE;
                    state.credits += ASTEROID_SCORE;
                    spawn_particles(&mut state.particles, rng, at, 20);
                    state.bonus_text.push(BonusText {
                        text: "+50".to_string(),
                        position: at,
                        life: 60,
                    });
                    events.push(GameEvent::AsteroidShattered {
                        asteroid_id: state.asteroids[i].id,
                    });
                    state.asteroids[i].radius = 0.0;
                } else {
                    spawn_particles(&mut state.particles, rng, at, 5);
                }
            }
        }
    }
    state.asteroids.retain(|a| {
        a.radius > 0.0
            && a.position.y < FIELD_HEIGHT + 50.0
            && a.position.x > -60.0
            && a.position.x < FIELD_WIDTH + 60.0
    });

    // Asteroid ground strikes.
    let mut grounded = Vec::new();
    state.asteroids.retain(|a| {
        if a.position.y + a.radius >= GROUND_Y {
            grounded.push(*a);
            false
        } else {
            true
        }
    });
    for a in grounded {
        state.screen_shake = 10.0;
        let ground_point = Vec2::new(a.position.x, GROUND_Y);
        spawn_particles(&mut state.particles, rng, ground_point, 20);
        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, ground_point, a.radius * 2.0, false));
        for ci in 0..state.cities.len() {
            if !state.cities[ci].alive {
                continue;
            }
            if (state.cities[ci].x - a.position.x).abs()
                < a.radius + skyfall_core::constants::CITY_HIT_RADIUS
            {
                apply_city_hit(state, rng, events, ci);
            }
        }
        events.push(GameEvent::GroundImpact {
            x: a.position.x,
            city: None,
        });
    }
}
