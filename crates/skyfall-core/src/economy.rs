//! Passive-income buildings.

use serde::{Deserialize, Serialize};

/// The six credit-generating structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    SolarFarm,
    ScrapYard,
    MunitionsFactory,
    OrbitalMine,
    DefenseContract,
    AiCore,
}

#[derive(Debug, Clone, Copy)]
pub struct BuildingDef {
    pub kind: BuildingKind,
    pub name: &'static str,
    pub base_cost: f64,
    /// Credits generated per second per building owned.
    pub base_cps: f64,
}

pub const BUILDING_DEFS: [BuildingDef; 6] = [
    BuildingDef {
        kind: BuildingKind::SolarFarm,
        name: "Solar Farm",
        base_cost: 25.0,
        base_cps: 0.4,
    },
    BuildingDef {
        kind: BuildingKind::ScrapYard,
        name: "Scrap Yard",
        base_cost: 250.0,
        base_cps: 4.0,
    },
    BuildingDef {
        kind: BuildingKind::MunitionsFactory,
        name: "Munitions Factory",
        base_cost: 2_500.0,
        base_cps: 25.0,
    },
    BuildingDef {
        kind: BuildingKind::OrbitalMine,
        name: "Orbital Mine",
        base_cost: 15_000.0,
        base_cps: 120.0,
    },
    BuildingDef {
        kind: BuildingKind::DefenseContract,
        name: "Defense Contract",
        base_cost: 200_000.0,
        base_cps: 1_000.0,
    },
    BuildingDef {
        kind: BuildingKind::AiCore,
        name: "AI Core",
        base_cost: 2_500_000.0,
        base_cps: 6_000.0,
    },
];

impl BuildingKind {
    pub fn def(&self) -> &'static BuildingDef {
        BUILDING_DEFS
            .iter()
            .find(|d| d.kind == *self)
            .expect("every BuildingKind has a table entry")
    }
}

/// Owned building counts, indexed in `BUILDING_DEFS` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buildings {
    pub counts: [u32; 6],
}

impl Buildings {
    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.counts[kind as usize]
    }

    pub fn count_mut(&mut self, kind: BuildingKind) -> &mut u32 {
        &mut self.counts[kind as usize]
    }

    /// Cost of the next copy of a building. 15% compounding per copy owned.
    pub fn next_cost(&self, kind: BuildingKind) -> f64 {
        let def = kind.def();
        (def.base_cost * 1.15f64.powi(self.count(kind) as i32)).floor()
    }

    /// Total credits generated per second.
    pub fn income_per_second(&self) -> f64 {
        BUILDING_DEFS
            .iter()
            .map(|def| self.count(def.kind) as f64 * def.base_cps)
            .sum()
    }
}
