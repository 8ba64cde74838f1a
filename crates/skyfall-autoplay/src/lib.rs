//! Autopilot for SKYFALL.
//!
//! Drives a session through the same `PlayerCommand` surface a human uses:
//! target scoring, lead-point firing, shop purchases, and phase shortcuts.
//! No privileged access to the engine beyond reading the game state.

pub mod pilot;
pub mod targeting;

pub use skyfall_core as core;
pub use pilot::AutoPilot;

#[cfg(test)]
mod tests;
