//! Simulation engine for SKYFALL.
//!
//! Owns the game state and the seeded RNG, drains queued player commands at
//! tick boundaries, and advances every entity through a fixed sequence of
//! sub-phases. Completely headless, enabling deterministic testing.

pub mod engine;
pub mod intercept;
pub mod level;
pub mod systems;

pub use skyfall_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
