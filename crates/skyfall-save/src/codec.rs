//! Versioned session save codec.

use log::warn;
use serde::{Deserialize, Serialize};

use skyfall_core::state::GameState;

/// Bumped whenever `GameState` changes incompatibly. Old saves are
/// discarded rather than migrated.
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SaveEnvelope {
    v: u32,
    state: GameState,
}

/// Serialize a session to its portable save string.
pub fn encode_save(state: &GameState) -> Result<String, String> {
    let envelope = SaveEnvelope {
        v: SAVE_VERSION,
        state: state.clone(),
    };
    serde_json::to_string(&envelope).map_err(|e| format!("Failed to serialize save: {e}"))
}

/// Decode a save string. Fails closed: any parse error or version
/// mismatch yields `None` and the save is treated as absent. The id
/// generator is resynchronized so entities created after the load cannot
/// collide with loaded ids.
pub fn decode_save(blob: &str) -> Option<GameState> {
    let envelope: SaveEnvelope = match serde_json::from_str(blob) {
        Ok(e) => e,
        Err(e) => {
            warn!("discarding malformed save: {e}");
            return None;
        }
    };
    if envelope.v != SAVE_VERSION {
        warn!(
            "discarding save with version {} (expected {SAVE_VERSION})",
            envelope.v
        );
        return None;
    }
    let mut state = envelope.state;
    state.resync_ids();
    Some(state)
}
