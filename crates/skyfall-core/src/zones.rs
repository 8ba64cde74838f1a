//! Static lookup from player level to a zone definition.

use serde::{Deserialize, Serialize};

/// Cosmetic palette handed to the renderer. Colors are CSS strings; the
/// simulation never interprets them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZonePalette {
    pub sky: [&'static str; 3],
    pub ground: [&'static str; 3],
    pub trail: &'static str,
}

/// A contiguous level range with a distinct hazard set and palette.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub id: u32,
    pub name: &'static str,
    pub subtitle: &'static str,
    /// Inclusive level range.
    pub levels: (u32, u32),
    pub palette: ZonePalette,
    pub has_heat_seekers: bool,
    pub has_bombers: bool,
    pub has_blizzard: bool,
    pub has_decoys: bool,
    pub has_asteroids: bool,
    pub has_emp_threats: bool,
    /// Eruptions accompany the decoy zone and everything after it.
    pub has_eruptions: bool,
    pub speed_multiplier: f64,
    pub spawn_multiplier: f64,
}

pub const ZONES: [ZoneDefinition; 5] = [
    ZoneDefinition {
        id: 1,
        name: "GREEN VALLEY",
        subtitle: "The war begins...",
        levels: (1, 5),
        palette: ZonePalette {
            sky: ["#000011", "#0a0a2e", "#1a0a2e"],
            ground: ["#2a5a1a", "#1e4a12", "#0e2a08"],
            trail: "rgba(255, 100, 50, 0.9)",
        },
        has_heat_seekers: false,
        has_bombers: false,
        has_blizzard: false,
        has_decoys: false,
        has_asteroids: false,
        has_emp_threats: false,
        has_eruptions: false,
        speed_multiplier: 1.0,
        spawn_multiplier: 1.0,
    },
    ZoneDefinition {
        id: 2,
        name: "DESERT OUTPOST",
        subtitle: "The heat is rising...",
        levels: (6, 10),
        palette: ZonePalette {
            sky: ["#1a0800", "#2a1400", "#3a1800"],
            ground: ["#8a6a30", "#6a5020", "#4a3810"],
            trail: "rgba(255, 150, 30, 0.9)",
        },
        has_heat_seekers: true,
        has_bombers: false,
        has_blizzard: false,
        has_decoys: false,
        has_asteroids: false,
        has_emp_threats: false,
        has_eruptions: false,
        speed_multiplier: 1.15,
        spawn_multiplier: 1.1,
    },
    ZoneDefinition {
        id: 3,
        name: "ARCTIC BASE",
        subtitle: "Visibility is limited...",
        levels: (11, 15),
        palette: ZonePalette {
            sky: ["#0a1520", "#122838", "#1a3848"],
            ground: ["#aabbcc", "#8899aa", "#667788"],
            trail: "rgba(180, 200, 255, 0.9)",
        },
        has_heat_seekers: true,
        has_bombers: true,
        has_blizzard: true,
        has_decoys: false,
        has_asteroids: false,
        has_emp_threats: false,
        has_eruptions: false,
        speed_multiplier: 1.25,
        spawn_multiplier: 1.2,
    },
    ZoneDefinition {
        id: 4,
        name: "VOLCANIC FORTRESS",
        subtitle: "The ground trembles...",
        levels: (16, 20),
        palette: ZonePalette {
            sky: ["#1a0505", "#2a0a0a", "#3a1010"],
            ground: ["#4a2a1a", "#3a1a0a", "#2a1005"],
            trail: "rgba(255, 80, 20, 0.9)",
        },
        has_heat_seekers: true,
        has_bombers: true,
        has_blizzard: false,
        has_decoys: true,
        has_asteroids: false,
        has_emp_threats: false,
        has_eruptions: true,
        speed_multiplier: 1.4,
        spawn_multiplier: 1.3,
    },
    ZoneDefinition {
        id: 5,
        name: "SPACE STATION",
        subtitle: "Final frontier...",
        levels: (21, 999),
        palette: ZonePalette {
            sky: ["#020208", "#050510", "#080818"],
            ground: ["#334455", "#2a3a4a", "#1a2a3a"],
            trail: "rgba(100, 255, 200, 0.9)",
        },
        has_heat_seekers: true,
        has_bombers: true,
        has_blizzard: false,
        has_decoys: true,
        has_asteroids: true,
        has_emp_threats: true,
        has_eruptions: true,
        speed_multiplier: 1.5,
        spawn_multiplier: 1.4,
    },
];

/// Zone for a given level. Levels outside every defined range (including 0
/// and anything past the last range) fall back to the final zone.
pub fn zone_for(level: u32) -> &'static ZoneDefinition {
    for zone in &ZONES {
        if level >= zone.levels.0 && level <= zone.levels.1 {
            return zone;
        }
    }
    &ZONES[ZONES.len() - 1]
}

/// Zero-based index of the zone containing `level`, with the same fallback.
pub fn zone_index(level: u32) -> usize {
    for (i, zone) in ZONES.iter().enumerate() {
        if level >= zone.levels.0 && level <= zone.levels.1 {
            return i;
        }
    }
    ZONES.len() - 1
}
