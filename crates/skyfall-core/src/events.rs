//! Events emitted by the simulation for audio and UI feedback.
//!
//! Events are observational only: dropping every event leaves the
//! simulation unchanged.

use serde::{Deserialize, Serialize};

use crate::enums::{BossKind, WeaponKind};

/// Feedback events for the frontend sound/UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Interceptor launched from a battery.
    InterceptorLaunched { battery: usize },
    /// A threat was destroyed. `score` includes combo and lucky bonuses.
    ThreatDestroyed { threat_id: u32, score: f64 },
    /// An asteroid was shattered.
    AsteroidShattered { asteroid_id: u32 },
    /// A ground impact landed. `city` names the slot hit, if any.
    GroundImpact { x: f64, city: Option<usize> },
    /// A city shield absorbed an impact.
    ShieldAbsorbed { city: usize },
    /// A city was destroyed.
    CityDestroyed { city: usize },
    /// A battery was knocked out by an EMP ground strike.
    BatteryDisabled { battery: usize },
    /// A special weapon was discharged.
    WeaponFired { kind: WeaponKind },
    /// The boss appeared.
    BossSpawned { kind: BossKind, hp: i32 },
    /// The boss was destroyed. `bonus` is the level-scaled reward.
    BossDefeated { kind: BossKind, bonus: f64 },
    /// The level's completion conditions were all met.
    LevelComplete { level: u32, city_bonus: f64 },
    /// All cities destroyed; the run is over.
    GameOver { score: f64 },
    /// An achievement unlocked this tick.
    AchievementUnlocked { id: String },
}
