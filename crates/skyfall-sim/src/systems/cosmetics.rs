//! Cosmetic entity upkeep: particles, floating text, toasts, screen shake.
//!
//! Nothing here feeds back into combat. Spawn triggers and lifetimes are
//! simulated so feedback timing stays deterministic; appearance is the
//! renderer's problem.

use rand::Rng;

use skyfall_core::entities::Particle;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

/// Burst of sparks scattered uniformly around a point.
pub fn spawn_particles(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    at: Vec2,
    count: u32,
) {
    for _ in 0..count {
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let speed = rng.gen::<f64>() * 3.0 + 1.0;
        particles.push(Particle {
            position: at,
            velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            life: 1.0,
            max_life: 30.0 + rng.gen::<f64>() * 30.0,
        });
    }
}

pub fn run(state: &mut GameState) {
    for p in &mut state.particles {
        p.position += p.velocity;
        // Light gravity pull on sparks.
        p.velocity.y += 0.05;
        p.life -= 1.0 / p.max_life;
    }
    state.particles.retain(|p| p.life > 0.0);

    for bt in &mut state.bonus_text {
        bt.position.y -= 0.8;
        bt.life = bt.life.saturating_sub(1);
    }
    state.bonus_text.retain(|bt| bt.life > 0);

    for t in &mut state.toasts {
        t.timer = t.timer.saturating_sub(1);
    }
    state.toasts.retain(|t| t.timer > 0);

    state.screen_shake = (state.screen_shake - 0.5).max(0.0);
}
