//! End-of-tick retention and terminal checks.

use skyfall_core::constants::{
    ASTEROID_DANGER_BAND, CITY_BONUS, GROUND_Y, LEVEL_TRANSITION_TICKS,
};
use skyfall_core::entities::BonusText;
use skyfall_core::enums::Phase;
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

pub fn run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.threats.retain(|t| !t.destroyed);
    state.interceptors.retain(|i| !i.arrived);
    state.explosions.retain(|e| e.radius > 0.0 || e.growing);

    if !state.level_complete && level_cleared(state) {
        state.level_complete = true;
        state.level_transition_timer = LEVEL_TRANSITION_TICKS as i32;
        let alive = state.cities_alive() as f64;
        let city_bonus = alive * CITY_BONUS;
        state.score += city_bonus;
        state.run_cities_saved += state.cities_alive() as u64;
        state.bonus_text.push(BonusText {
            text: format!("WAVE CLEAR +{city_bonus}"),
            position: Vec2::new(480.0, 220.0),
            life: 120,
        });
        events.push(GameEvent::LevelComplete {
            level: state.level,
            city_bonus,
        });
    }

    if !state.game_over && state.cities_alive() == 0 {
        log::info!(
            "run over at level {} with score {:.0}",
            state.level,
            state.score
        );
        state.game_over = true;
        state.phase = Phase::GameOver;
        if state.score > state.high_score {
            state.high_score = state.score;
        }
        events.push(GameEvent::GameOver { score: state.score });
    }
}

/// A wave ends only once the quota is spawned and every airborne object has
/// resolved. Asteroids still high above the danger band do not block the wave.
fn level_cleared(state: &GameState) -> bool {
    if state.spawned_this_level < state.total_this_level {
        return false;
    }
    if state.threats.iter().any(|t| !t.destroyed) {
        return false;
    }
    if !state.explosions.is_empty() || !state.interceptors.is_empty() {
        return false;
    }
    if !state.bombers.is_empty() {
        return false;
    }
    if state
        .asteroids
        .iter()
        .any(|a| a.position.y + a.radius >= GROUND_Y - ASTEROID_DANGER_BAND)
    {
        return false;
    }
    if state.is_boss_level && !state.boss_defeated {
        return false;
    }
    true
}
