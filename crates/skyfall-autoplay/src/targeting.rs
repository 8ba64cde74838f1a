//! Target scoring for the autopilot.
//!
//! Ranks every live threat, near-ground asteroid, and the boss by urgency,
//! solves an intercept for each candidate, and returns the aim point for
//! the most pressing one. Objects an interceptor is already flying toward
//! are demoted rather than excluded, so saturation attacks still draw fire.

use std::collections::HashSet;

use skyfall_core::constants::GROUND_Y;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_sim::intercept::find_best_intercept;

/// Coarse spatial bucket for deduplicating aim points. Two points in the
/// same 16px cell count as the same target.
fn bucket(p: Vec2) -> (i64, i64) {
    ((p.x / 16.0).round() as i64, (p.y / 16.0).round() as i64)
}

/// Pick the best aim point, or `None` when nothing is worth a shot.
pub fn find_best_target(state: &GameState) -> Option<Vec2> {
    let mut best: Option<(f64, Vec2)> = None;

    let covered: HashSet<(i64, i64)> = state
        .interceptors
        .iter()
        .map(|i| bucket(i.target))
        .collect();

    for m in &state.threats {
        if m.destroyed {
            continue;
        }
        let pos = m.position();
        // Too high up to bother leading yet.
        if pos.y < 40.0 {
            continue;
        }

        let ground_dist = GROUND_Y - pos.y;
        let mut threat = 1.0 / (ground_dist + 1.0);
        if covered.contains(&bucket(pos)) {
            threat *= 0.3;
        }
        if m.variant.is_decoy() {
            threat *= 0.1;
        }
        if m.variant.is_emp() {
            threat *= 1.6;
        }
        if matches!(m.variant, skyfall_core::enums::ThreatVariant::HeatSeeker) {
            threat *= 1.35;
        }

        let Some(intercept) = find_best_intercept(state, pos, m.velocity()) else {
            continue;
        };
        if covered.contains(&bucket(intercept.point)) {
            threat *= 0.3;
        }

        if best.map_or(true, |(score, _)| threat > score) {
            best = Some((threat, intercept.point));
        }
    }

    for a in &state.asteroids {
        let ground_dist = GROUND_Y - a.position.y - a.radius;
        if ground_dist >= 240.0 {
            continue;
        }
        let mut threat = (1.0 / (ground_dist + 1.0)) * 1.8;
        let Some(intercept) = find_best_intercept(state, a.position, a.velocity) else {
            continue;
        };
        if covered.contains(&bucket(intercept.point)) {
            threat *= 0.4;
        }
        if best.map_or(true, |(score, _)| threat > score) {
            best = Some((threat, intercept.point));
        }
    }

    if let Some(boss) = state.boss.as_ref().filter(|_| !state.boss_defeated) {
        let hp_pct = boss.hp as f64 / boss.max_hp as f64;
        // Urgency rises as the boss weakens, to finish it off.
        let mut threat = (2.0 - hp_pct) * 0.5;
        let vel = Vec2::new(boss.speed * boss.move_dir, 0.0);
        if let Some(intercept) = find_best_intercept(state, boss.position, vel) {
            if covered.contains(&bucket(intercept.point)) {
                threat *= 0.4;
            }
            threat *= 2.0;
            if best.map_or(true, |(score, _)| threat > score) {
                best = Some((threat, intercept.point));
            }
        }
    }

    best.map(|(_, point)| point)
}
