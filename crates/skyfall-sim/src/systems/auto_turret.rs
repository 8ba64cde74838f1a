//! Automatic turret: periodically lead-fires at the lowest live threat.

use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;

use super::weapons::fire_interceptor;
use crate::intercept::find_best_intercept;

/// Fire at the threat closest to the ground (ignoring anything still above
/// the top band) whenever the upgrade interval elapses. A failed solve
/// simply skips this cycle.
pub fn run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let interval = state.upgrades.auto_turret_interval();
    if interval == 0 {
        return;
    }
    state.auto_turret_timer += 1;
    if state.auto_turret_timer < interval {
        return;
    }
    state.auto_turret_timer = 0;

    let lowest = state
        .threats
        .iter()
        .filter(|m| !m.destroyed && m.position().y >= 100.0)
        .max_by(|a, b| a.position().y.total_cmp(&b.position().y));

    let Some(threat) = lowest else { return };
    let (pos, vel) = (threat.position(), threat.velocity());
    if let Some(solution) = find_best_intercept(state, pos, vel) {
        fire_interceptor(state, events, solution.point, true);
    }
}
