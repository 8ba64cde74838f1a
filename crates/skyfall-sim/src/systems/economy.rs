//! Passive income from buildings.

use skyfall_core::constants::TICK_RATE;
use skyfall_core::state::GameState;

/// Refresh the income rate and accrue one tick of credits. Income flows
/// during active play and the level-complete countdown, but not in menus.
pub fn run(state: &mut GameState) {
    let cps = state.buildings.income_per_second();
    state.income_rate = cps;

    let per_tick = cps / TICK_RATE as f64;
    state.credits += per_tick;
    state.score += per_tick;
}
