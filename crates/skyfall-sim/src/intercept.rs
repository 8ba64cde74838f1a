//! Closed-form interception solver.
//!
//! Given a target moving at constant velocity and a projectile of fixed
//! speed, the meeting time satisfies |rel + v·t| = s·t, a quadratic in t.
//! Both the auto-turret and the autopilot aim through this solver; a `None`
//! always means "no shot this cycle", never a fault.

use skyfall_core::constants::{FIELD_WIDTH, GROUND_Y};
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

/// Flight-time cap: solutions further out than this many ticks are rejected.
const MAX_INTERCEPT_TICKS: f64 = 300.0;

/// Smallest positive meeting time for a projectile launched from `origin` at
/// `projectile_speed` against a target at `target` moving at `vel`.
pub fn solve_intercept_time(
    origin: Vec2,
    target: Vec2,
    vel: Vec2,
    projectile_speed: f64,
) -> Option<f64> {
    let rel = target - origin;
    let a = vel.length_squared() - projectile_speed * projectile_speed;
    let b = 2.0 * rel.dot(vel);
    let c = rel.length_squared();

    // Near-equal speeds degenerate to a linear equation.
    if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            return None;
        }
        let t = -c / b;
        return (t > 0.0).then_some(t);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let t = f64::min(
        if t1 > 0.0 { t1 } else { f64::INFINITY },
        if t2 > 0.0 { t2 } else { f64::INFINITY },
    );
    if !t.is_finite() || t > MAX_INTERCEPT_TICKS {
        return None;
    }
    Some(t)
}

/// A solved aim point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptPoint {
    pub point: Vec2,
    pub time: f64,
}

/// Best aim point across every ready battery: solve from each muzzle and
/// keep the soonest meeting, then clamp the aim into the playfield above
/// the ground line.
pub fn find_best_intercept(state: &GameState, target: Vec2, vel: Vec2) -> Option<InterceptPoint> {
    let projectile_speed = state.upgrades.interceptor_speed();
    let mut best: Option<InterceptPoint> = None;

    for b in &state.batteries {
        let has_ammo = state.auto_mode || b.ammo > 0;
        if !has_ammo || b.disabled > 0 {
            continue;
        }
        if let Some(t) = solve_intercept_time(b.muzzle(), target, vel, projectile_speed) {
            if best.map_or(true, |p| t < p.time) {
                best = Some(InterceptPoint {
                    point: target + vel * t,
                    time: t,
                });
            }
        }
    }

    best.map(|p| InterceptPoint {
        point: Vec2::new(
            p.point.x.clamp(20.0, FIELD_WIDTH - 20.0),
            p.point.y.min(GROUND_Y - 24.0).max(40.0),
        ),
        time: p.time,
    })
}
