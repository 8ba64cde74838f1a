//! Persistence for SKYFALL.
//!
//! Two independent records: the versioned session save (the full
//! `GameState`, resumable mid-run) and the small lifetime-stats record
//! (totals, achievements, prestige). A broken or stale session save is
//! treated as absent; stats merge leniently so older records still load.

pub mod codec;
pub mod store;

pub use skyfall_core as core;
pub use codec::{decode_save, encode_save, SAVE_VERSION};

#[cfg(test)]
mod tests;
