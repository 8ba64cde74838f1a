//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
///
/// The level-complete countdown is not a phase: it is a flag inside `Playing`
/// so that passive income keeps accruing through the transition (see the
/// economy system).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for a start action.
    #[default]
    Title,
    /// Active combat (including the level-complete countdown).
    Playing,
    /// Zone banner between zones; counts down then opens the shop.
    ZoneIntro,
    /// Upgrade shop; gates resumption of play at zone boundaries.
    Shop,
    /// Terminal until a new-game action.
    GameOver,
}

/// Threat missile behavior variant.
///
/// Variants are mutually exclusive by construction. The spawner rolls them in
/// priority order (MIRV, heat-seeker, decoy, EMP); a roll that lands on an
/// earlier category skips all later rolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThreatVariant {
    /// Plain ballistic warhead.
    Plain,
    /// Splits into two children once past `split_at` progress. `split` flips
    /// permanently so a missile splits at most once.
    Mirv { split: bool, split_at: f64 },
    /// Continuously steers its impact point toward the nearest living city.
    HeatSeeker,
    /// Cosmetic shell: grants no score, impacts harmlessly.
    Decoy,
    /// Disables the nearest battery on ground impact instead of exploding.
    Emp,
}

impl ThreatVariant {
    pub fn is_decoy(&self) -> bool {
        matches!(self, ThreatVariant::Decoy)
    }

    pub fn is_emp(&self) -> bool {
        matches!(self, ThreatVariant::Emp)
    }
}

/// Boss archetype. One boss at most is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    /// Wide salvo of direct missiles, count scaling with level.
    Mothership,
    /// Fixed fan of five missiles at set angles.
    Fortress,
    /// Six fast missiles, each with a 30% heat-seeking chance.
    SwarmQueen,
}

impl BossKind {
    /// Boss cycle by level: 5 -> Mothership, 10 -> Fortress, 15 -> SwarmQueen, 20 -> Mothership...
    pub fn for_level(level: u32) -> BossKind {
        match (level / 5).saturating_sub(1) % 3 {
            0 => BossKind::Mothership,
            1 => BossKind::Fortress,
            _ => BossKind::SwarmQueen,
        }
    }

    /// Collision radius against player explosions.
    pub fn hit_radius(&self) -> f64 {
        match self {
            BossKind::Fortress => 45.0,
            _ => 40.0,
        }
    }
}

/// Special weapon slots, in selection order (keys 1..3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Laser,
    Swarm,
    Mine,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Laser, WeaponKind::Swarm, WeaponKind::Mine];
}
