//! Simulation sub-phases, run in a fixed order each tick.
//!
//! Systems are free functions over `&mut GameState`; none owns state and
//! none calls another except through the shared helpers exposed here. The
//! engine drives the ordering in [`crate::engine::SimulationEngine`].

pub mod auto_turret;
pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod cosmetics;
pub mod economy;
pub mod hazards;
pub mod impacts;
pub mod motion;
pub mod spawner;
pub mod weapons;
