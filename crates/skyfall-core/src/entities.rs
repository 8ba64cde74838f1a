//! Simulated entity records.
//!
//! Entities are plain data: all relations are by numeric id or positional
//! index inside the owning `GameState` collections, never by reference.
//! Ids exist for display/debug identity only and carry no ordering guarantee.

use serde::{Deserialize, Serialize};

use crate::enums::{BossKind, ThreatVariant, WeaponKind};
use crate::types::{along, Vec2};

/// One of the six defended city slots. Position is fixed for the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    pub alive: bool,
}

/// A missile battery on the ground line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Battery {
    pub x: f64,
    pub y: f64,
    pub ammo: u32,
    pub max_ammo: u32,
    /// Remaining EMP-disable ticks; the battery cannot fire while > 0.
    pub disabled: u32,
}

impl Battery {
    /// Launch point for interceptors and laser beams.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x, self.y - crate::constants::MUZZLE_OFFSET)
    }
}

/// An incoming threat missile, tracked as normalized progress along the
/// straight line from its spawn point to its impact point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatMissile {
    pub id: u32,
    pub start: Vec2,
    pub target: Vec2,
    /// Monotonically increasing. May slightly exceed 1.0 on the impact tick.
    pub progress: f64,
    pub speed: f64,
    pub destroyed: bool,
    pub variant: ThreatVariant,
    pub frozen: bool,
    pub frozen_timer: u32,
}

impl ThreatMissile {
    pub fn position(&self) -> Vec2 {
        along(self.start, self.target, self.progress)
    }

    /// Effective speed factor including the frozen penalty.
    pub fn speed_factor(&self) -> f64 {
        if self.frozen {
            crate::constants::FROZEN_SPEED_FACTOR
        } else {
            1.0
        }
    }

    /// Velocity in pixels per tick, for lead-point prediction.
    pub fn velocity(&self) -> Vec2 {
        let scale = self.speed * self.speed_factor() / crate::constants::PROGRESS_SCALE;
        (self.target - self.start) * scale
    }
}

/// A player interceptor in flight. Progress is normalized by the Euclidean
/// distance to the aim point so real speed is constant regardless of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interceptor {
    pub id: u32,
    pub start: Vec2,
    pub target: Vec2,
    pub progress: f64,
    pub speed: f64,
    pub arrived: bool,
}

impl Interceptor {
    pub fn position(&self) -> Vec2 {
        along(self.start, self.target, self.progress)
    }
}

/// An expanding/contracting blast wave. Live for collision while radius > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub center: Vec2,
    pub radius: f64,
    pub max_radius: f64,
    pub growing: bool,
    /// Fades with the shrink phase; rendering only.
    pub alpha: f64,
    /// Player blasts damage the boss; hostile blasts do not.
    pub from_player: bool,
}

impl Explosion {
    pub fn ignite(id: u32, center: Vec2, max_radius: f64, from_player: bool) -> Explosion {
        Explosion {
            id,
            center,
            radius: 0.0,
            max_radius,
            growing: true,
            alpha: 1.0,
            from_player,
        }
    }
}

/// Horizontally crossing bomber that drops missiles at intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomber {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    /// 1 = left-to-right, -1 = right-to-left.
    pub direction: f64,
    pub drops_remaining: u32,
    pub drop_timer: f64,
    pub drop_interval: f64,
}

/// Drifting rock with hit points; damaged by explosion overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub hp: i32,
}

/// The boss entity for every fifth level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub position: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub kind: BossKind,
    pub attack_timer: i32,
    /// Horizontal oscillation direction (1 or -1).
    pub move_dir: f64,
    pub speed: f64,
    /// Damage-flash cosmetic countdown.
    pub flash_timer: u32,
}

/// Proximity mine. Arms shortly after placement, detonates near any threat
/// or the boss, and expires at end of life regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    pub id: u32,
    pub position: Vec2,
    pub radius: f64,
    pub life: u32,
    pub max_life: u32,
    pub armed: bool,
}

/// A finite-life laser beam segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    pub id: u32,
    pub start: Vec2,
    pub end: Vec2,
    pub life: u32,
    pub max_life: u32,
}

/// A special weapon slot with per-level charges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpecialWeapon {
    pub kind: WeaponKind,
    pub charges: u32,
    pub max_charges: u32,
}

/// Cosmetic spark. No gameplay consequence; only the spawn trigger and
/// lifetime are simulated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// 1.0 at spawn, decays to 0.
    pub life: f64,
    pub max_life: f64,
}

/// Floating score/bonus text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusText {
    pub text: String,
    pub position: Vec2,
    pub life: u32,
}

/// Achievement toast banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub text: String,
    pub timer: u32,
}
