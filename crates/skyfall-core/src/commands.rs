//! Player commands sent to the simulation.
//!
//! Commands are queued and drained at the next tick boundary, in arrival
//! order, before any simulation sub-phase runs.

use serde::{Deserialize, Serialize};

use crate::economy::BuildingKind;
use crate::enums::WeaponKind;
use crate::prestige::PrestigeBonuses;
use crate::upgrades::UpgradeKind;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Combat ---
    /// Fire at a point: interceptors from the nearest ready battery, or a
    /// discharge of the selected special weapon.
    FireAt { x: f64, y: f64 },
    /// Arm a special weapon for the next `FireAt`.
    SelectWeapon { kind: WeaponKind },
    /// Cycle the armed weapon through the available slots.
    CycleWeapon,
    /// Disarm the selected weapon; fall back to interceptors.
    CancelWeapon,

    // --- Purchases ---
    BuyUpgrade { kind: UpgradeKind },
    BuyBuilding { kind: BuildingKind },

    // --- Session control ---
    /// Leave the title screen and begin level 1 (or 2 with head start).
    StartGame,
    /// Reset to a fresh session with the given prestige bonuses applied.
    NewGame { bonuses: PrestigeBonuses },
    /// Skip the remaining zone intro countdown.
    SkipIntro,
    /// Leave the shop and begin the next level.
    AdvanceLevel,
    /// Toggle the built-in autopilot.
    ToggleAutoplay,

    // --- Admin/debug ---
    /// Jump the session to an arbitrary level.
    SkipToLevel { level: u32 },
    /// Grant free credits.
    GrantCredits { amount: f64 },
}
