//! Core types and definitions for the SKYFALL simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entities, commands, events, static tables (zones, upgrades, buildings,
//! prestige, achievements), and the aggregate `GameState`. It has no
//! dependency on the engine or any runtime framework.

pub mod achievements;
pub mod commands;
pub mod constants;
pub mod economy;
pub mod entities;
pub mod enums;
pub mod events;
pub mod prestige;
pub mod state;
pub mod stats;
pub mod types;
pub mod upgrades;
pub mod zones;
