//! Tests for the simulation engine: determinism, the intercept solver,
//! collisions, scoring, and the phase machine.

use skyfall_core::commands::PlayerCommand;
use skyfall_core::constants::*;
use skyfall_core::entities::{Bomber, Explosion, Interceptor, ThreatMissile};
use skyfall_core::enums::{Phase, ThreatVariant, WeaponKind};
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_core::upgrades::UpgradeKind;

use crate::engine::{SimConfig, SimulationEngine};
use crate::intercept::{find_best_intercept, solve_intercept_time};

/// Engine in the `Playing` phase with the spawner and hazards silenced so
/// tests can stage the field by hand.
fn quiet_engine() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed: 7 });
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    let state = engine.state_mut();
    state.spawned_this_level = 0;
    state.total_this_level = 10;
    state.spawn_timer = 1_000_000.0;
    state.bomber_spawn_timer = 1_000_000.0;
    state.asteroid_spawn_timer = 1_000_000.0;
    state.eruption_timer = 1_000_000.0;
    engine
}

fn plain_threat(id: u32, target: Vec2, progress: f64, speed: f64) -> ThreatMissile {
    ThreatMissile {
        id,
        start: Vec2::new(target.x, -10.0),
        target,
        progress,
        speed,
        destroyed: false,
        variant: ThreatVariant::Plain,
        frozen: false,
        frozen_timer: 0,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 12345 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 12345 });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for tick in 0..600 {
        engine_a.tick();
        engine_b.tick();

        let json_a = serde_json::to_string(engine_a.state()).unwrap();
        let json_b = serde_json::to_string(engine_b.state()).unwrap();
        assert_eq!(json_a, json_b, "states diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 111 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 222 });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for _ in 0..600 {
        engine_a.tick();
        engine_b.tick();
    }

    let json_a = serde_json::to_string(engine_a.state()).unwrap();
    let json_b = serde_json::to_string(engine_b.state()).unwrap();
    assert_ne!(json_a, json_b);
}

// ---- Intercept solver ----

#[test]
fn test_solver_stationary_target() {
    let origin = Vec2::new(0.0, 0.0);
    let target = Vec2::new(0.0, 100.0);
    let t = solve_intercept_time(origin, target, Vec2::ZERO, 5.0).unwrap();
    assert!((t - 20.0).abs() < 1e-9);
}

#[test]
fn test_solver_crossing_target() {
    // Target at (10, 0) moving (0, 10), projectile speed 20: the quadratic
    // reduces to -300 t^2 + 100 = 0, so t = 1/sqrt(3).
    let t = solve_intercept_time(
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 10.0),
        20.0,
    )
    .unwrap();
    assert!((t - 1.0 / 3.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_solver_unreachable_target() {
    // Receding faster than the projectile can fly.
    let t = solve_intercept_time(
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 0.0),
        Vec2::new(10.0, 0.0),
        5.0,
    );
    assert!(t.is_none());
}

#[test]
fn test_solver_rejects_distant_solutions() {
    // Reachable, but only after more than 300 ticks.
    let t = solve_intercept_time(
        Vec2::new(0.0, 0.0),
        Vec2::new(10_000.0, 0.0),
        Vec2::ZERO,
        1.0,
    );
    assert!(t.is_none());
}

#[test]
fn test_best_intercept_clamps_aim() {
    let engine = quiet_engine();
    let point = find_best_intercept(engine.state(), Vec2::new(955.0, 10.0), Vec2::ZERO)
        .expect("stationary target in range");
    assert_eq!(point.point.x, 940.0);
    assert_eq!(point.point.y, 40.0);
}

#[test]
fn test_best_intercept_requires_ready_battery() {
    let mut engine = quiet_engine();
    for b in &mut engine.state_mut().batteries {
        b.ammo = 0;
    }
    assert!(find_best_intercept(engine.state(), Vec2::new(480.0, 200.0), Vec2::ZERO).is_none());
}

// ---- Scoring and combos ----

#[test]
fn test_explosion_kill_scores_base_value() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        let threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.5, 0.0);
        state.threats.push(threat);
        let center = state.threats[0].position();
        let id = state.alloc_id();
        state.explosions.push(Explosion::ignite(id, center, 60.0, true));
    }
    let score_before = engine.state().score;

    engine.tick();

    let state = engine.state();
    assert_eq!(state.score - score_before, KILL_SCORE);
    assert_eq!(state.combo_count, 1);
    assert_eq!(state.combo_multiplier, 1);
    assert_eq!(state.run_missiles_destroyed, 1);
    assert_eq!(state.cities_alive(), 6);
}

#[test]
fn test_combo_scales_with_kill_count() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        for i in 0..4 {
            let threat = plain_threat(
                state.alloc_id(),
                Vec2::new(400.0 + i as f64 * 10.0, GROUND_Y),
                0.5,
                0.0,
            );
            state.threats.push(threat);
        }
        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, Vec2::new(415.0, (GROUND_Y) / 2.0), 500.0, true));
    }
    let score_before = engine.state().score;

    engine.tick();

    let state = engine.state();
    // Kills resolve in order: x1, x2, x2, x3 once the multiplier catches up.
    assert_eq!(state.combo_count, 4);
    assert_eq!(state.combo_multiplier, 3);
    assert_eq!(state.max_combo, 4);
    assert_eq!(state.score - score_before, 10.0 + 20.0 + 20.0 + 30.0);
}

#[test]
fn test_chain_reaction_spawns_secondary_blast() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        state.upgrades.chain_reaction = 2;
        let threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.5, 0.0);
        state.threats.push(threat);
        let center = state.threats[0].position();
        let id = state.alloc_id();
        state.explosions.push(Explosion::ignite(id, center, 60.0, true));
    }

    engine.tick();

    let state = engine.state();
    let expected = state.upgrades.explosion_radius() * state.upgrades.chain_multiplier();
    let chain = state
        .explosions
        .iter()
        .find(|e| (e.max_radius - expected).abs() < 1e-9)
        .expect("chain explosion spawned");
    assert!(!chain.from_player);
}

#[test]
fn test_chain_blast_spawns_without_upgrade_levels() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        assert_eq!(state.upgrades.chain_reaction, 0);
        let threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.5, 0.0);
        state.threats.push(threat);
        let center = state.threats[0].position();
        let id = state.alloc_id();
        state.explosions.push(Explosion::ignite(id, center, 60.0, true));
    }

    engine.tick();

    // Level 0 only shrinks the chain multiplier to 0.6; it never disables
    // the cascade.
    let state = engine.state();
    let chain = state
        .explosions
        .iter()
        .find(|e| (e.max_radius - BASE_EXPLOSION_RADIUS * 0.6).abs() < 1e-9)
        .expect("chain explosion spawned at upgrade level zero");
    assert!(!chain.from_player);
}

#[test]
fn test_decoy_kill_scores_nothing() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        let mut threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.5, 0.0);
        threat.variant = ThreatVariant::Decoy;
        state.threats.push(threat);
        let center = state.threats[0].position();
        let id = state.alloc_id();
        state.explosions.push(Explosion::ignite(id, center, 60.0, true));
    }
    let score_before = engine.state().score;

    engine.tick();

    let state = engine.state();
    assert_eq!(state.score, score_before);
    assert_eq!(state.combo_count, 0);
    assert!(state.threats.is_empty());
}

#[test]
fn test_laser_kill_scores_before_combo_increment() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        state.upgrades.laser_weapon = 1;
        state.recharge_weapons();
        let threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.5, 0.0);
        state.threats.push(threat);
    }
    let aim = engine.state().threats[0].position();
    let score_before = engine.state().score;

    engine.queue_command(PlayerCommand::SelectWeapon {
        kind: WeaponKind::Laser,
    });
    engine.tick();
    engine.queue_command(PlayerCommand::FireAt { x: aim.x, y: aim.y });
    engine.tick();

    let state = engine.state();
    // Multiplier was 1 when the beam connected; the kill then starts a combo.
    assert_eq!(state.score - score_before, LASER_KILL_SCORE);
    assert_eq!(state.combo_count, 1);
    assert!(state.weapons_used_this_level.contains(&WeaponKind::Laser));
    let slot = state.weapon_slot(WeaponKind::Laser).unwrap();
    assert_eq!(slot.charges, slot.max_charges - 1);
}

// ---- Ground impacts ----

#[test]
fn test_shield_absorbs_until_capacity_then_city_falls() {
    let mut engine = quiet_engine();
    engine.state_mut().upgrades.shield_generator = 2;
    let city_x = engine.state().cities[0].x;

    for expected_hits in 1..=2u32 {
        let state = engine.state_mut();
        let threat = plain_threat(state.alloc_id(), Vec2::new(city_x, GROUND_Y), 1.1, 0.0);
        state.threats.push(threat);
        engine.tick();
        let state = engine.state();
        assert!(state.cities[0].alive);
        assert_eq!(state.shield_hits[0], expected_hits);
    }

    let state = engine.state_mut();
    let threat = plain_threat(state.alloc_id(), Vec2::new(city_x, GROUND_Y), 1.1, 0.0);
    state.threats.push(threat);
    engine.tick();
    assert!(!engine.state().cities[0].alive);
}

#[test]
fn test_emp_strike_disables_battery_without_damage() {
    let mut engine = quiet_engine();
    let battery_x = engine.state().batteries[0].x;
    {
        let state = engine.state_mut();
        let mut threat = plain_threat(state.alloc_id(), Vec2::new(battery_x, GROUND_Y), 1.1, 0.0);
        threat.variant = ThreatVariant::Emp;
        state.threats.push(threat);
    }

    engine.tick();

    let state = engine.state();
    assert_eq!(state.batteries[0].disabled, EMP_DISABLE_TICKS);
    assert_eq!(state.cities_alive(), 6);
    // The EMP flash is cosmetic only.
    assert!(state.explosions.iter().all(|e| !e.from_player));
    assert!(state.batteries[0].ammo > 0);

    for _ in 0..EMP_DISABLE_TICKS {
        engine.tick();
    }
    assert_eq!(engine.state().batteries[0].disabled, 0);
}

// ---- Threat behavior ----

#[test]
fn test_mirv_splits_exactly_once() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        let mut threat = plain_threat(state.alloc_id(), Vec2::new(480.0, GROUND_Y), 0.49, 10.0);
        threat.variant = ThreatVariant::Mirv {
            split: false,
            split_at: 0.5,
        };
        state.threats.push(threat);
    }

    engine.tick();

    let state = engine.state();
    assert_eq!(state.threats.len(), 3);
    assert!(matches!(
        state.threats[0].variant,
        ThreatVariant::Mirv { split: true, .. }
    ));
    for child in &state.threats[1..] {
        assert_eq!(child.variant, ThreatVariant::Plain);
        assert!((child.speed - 10.0 * 1.1).abs() < 1e-9);
    }

    engine.tick();
    assert_eq!(engine.state().threats.len(), 3);
}

#[test]
fn test_frozen_threats_crawl() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        let mut fast = plain_threat(state.alloc_id(), Vec2::new(300.0, GROUND_Y), 0.0, 5.0);
        fast.frozen = true;
        fast.frozen_timer = 100;
        state.threats.push(fast);
        let free = plain_threat(state.alloc_id(), Vec2::new(600.0, GROUND_Y), 0.0, 5.0);
        state.threats.push(free);
    }

    engine.tick();

    let state = engine.state();
    let frozen_progress = state.threats[0].progress;
    let free_progress = state.threats[1].progress;
    assert!((frozen_progress - free_progress * FROZEN_SPEED_FACTOR).abs() < 1e-9);
}

// ---- Firing ----

#[test]
fn test_multishot_consumes_one_ammo_per_action() {
    let mut engine = quiet_engine();
    engine.state_mut().upgrades.multi_shot = 2;
    let ammo_before: u32 = engine.state().batteries.iter().map(|b| b.ammo).sum();

    engine.queue_command(PlayerCommand::FireAt { x: 480.0, y: 200.0 });
    engine.tick();

    let state = engine.state();
    assert_eq!(state.interceptors.len(), 3);
    let ammo_after: u32 = state.batteries.iter().map(|b| b.ammo).sum();
    assert_eq!(ammo_before - ammo_after, 1);
}

#[test]
fn test_autopilot_mode_spares_ammo() {
    let mut engine = quiet_engine();
    engine.state_mut().auto_mode = true;
    let ammo_before: u32 = engine.state().batteries.iter().map(|b| b.ammo).sum();

    engine.queue_command(PlayerCommand::FireAt { x: 480.0, y: 200.0 });
    engine.tick();

    let state = engine.state();
    assert_eq!(state.interceptors.len(), 1);
    let ammo_after: u32 = state.batteries.iter().map(|b| b.ammo).sum();
    assert_eq!(ammo_before, ammo_after);
}

#[test]
fn test_interceptor_detonates_at_aim_point() {
    let mut engine = quiet_engine();
    let aim = Vec2::new(480.0, 200.0);
    {
        let state = engine.state_mut();
        state.interceptors.push(Interceptor {
            id: 900,
            start: Vec2::new(480.0, GROUND_Y - 18.0),
            target: aim,
            progress: 0.99,
            speed: 1_000.0,
            arrived: false,
        });
    }

    engine.tick();

    let state = engine.state();
    assert!(state.interceptors.is_empty());
    let blast = state.explosions.iter().find(|e| e.from_player).unwrap();
    assert!(blast.center.distance(aim) < 1e-9);
    assert_eq!(blast.max_radius, state.upgrades.explosion_radius());
}

// ---- Level lifecycle and phases ----

fn clear_field(state: &mut GameState) {
    state.spawned_this_level = state.total_this_level;
    state.threats.clear();
    state.interceptors.clear();
    state.explosions.clear();
    state.bombers.clear();
    state.asteroids.clear();
    state.boss = None;
    state.is_boss_level = false;
}

#[test]
fn test_level_complete_requires_empty_field() {
    // Each leftover object vetoes completion on its own.
    let stragglers: [fn(&mut GameState); 4] = [
        |s| {
            s.threats
                .push(plain_threat(800, Vec2::new(480.0, GROUND_Y), 0.5, 1.0))
        },
        |s| {
            s.interceptors.push(Interceptor {
                id: 801,
                start: Vec2::new(480.0, GROUND_Y - 18.0),
                target: Vec2::new(480.0, 200.0),
                progress: 0.1,
                speed: 0.0,
                arrived: false,
            })
        },
        |s| {
            s.bombers.push(Bomber {
                id: 802,
                x: 480.0,
                y: 100.0,
                speed: 0.0,
                direction: 1.0,
                drops_remaining: 2,
                drop_timer: 1_000_000.0,
                drop_interval: 1_000_000.0,
            })
        },
        |s| s.spawned_this_level = s.total_this_level - 1,
    ];

    for straggler in stragglers {
        let mut engine = quiet_engine();
        clear_field(engine.state_mut());
        straggler(engine.state_mut());
        engine.tick();
        assert!(!engine.state().level_complete);
    }

    let mut engine = quiet_engine();
    clear_field(engine.state_mut());
    let score_before = engine.state().score;
    engine.tick();
    let state = engine.state();
    assert!(state.level_complete);
    assert_eq!(state.level_transition_timer, LEVEL_TRANSITION_TICKS as i32);
    assert_eq!(state.score - score_before, 6.0 * CITY_BONUS);
}

#[test]
fn test_same_zone_transition_starts_next_level() {
    let mut engine = quiet_engine();
    clear_field(engine.state_mut());
    engine.tick();
    assert!(engine.state().level_complete);

    for _ in 0..LEVEL_TRANSITION_TICKS {
        engine.tick();
    }

    let state = engine.state();
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.level, 2);
    assert!(!state.level_complete);
}

#[test]
fn test_zone_boundary_passes_through_intro_and_shop() {
    let mut engine = quiet_engine();
    engine.state_mut().level = 5;
    clear_field(engine.state_mut());
    engine.tick();
    assert!(engine.state().level_complete);

    for _ in 0..LEVEL_TRANSITION_TICKS {
        engine.tick();
    }

    // The level number holds at the boundary until the shop is left.
    assert_eq!(engine.state().phase, Phase::ZoneIntro);
    assert_eq!(engine.state().level, 5);
    assert_eq!(engine.state().previous_zone_id, 1);

    for _ in 0..ZONE_INTRO_TICKS {
        engine.tick();
    }
    assert_eq!(engine.state().phase, Phase::Shop);
    assert_eq!(engine.state().level, 5);

    engine.queue_command(PlayerCommand::AdvanceLevel);
    engine.tick();
    assert_eq!(engine.state().phase, Phase::Playing);
    assert_eq!(engine.state().level, 6);
}

#[test]
fn test_skip_intro_jumps_to_shop() {
    let mut engine = quiet_engine();
    engine.state_mut().level = 5;
    clear_field(engine.state_mut());
    engine.tick();
    for _ in 0..LEVEL_TRANSITION_TICKS {
        engine.tick();
    }
    assert_eq!(engine.state().phase, Phase::ZoneIntro);

    engine.queue_command(PlayerCommand::SkipIntro);
    engine.tick();
    assert_eq!(engine.state().phase, Phase::Shop);
}

#[test]
fn test_game_over_when_all_cities_fall() {
    let mut engine = quiet_engine();
    {
        let state = engine.state_mut();
        for city in &mut state.cities {
            city.alive = false;
        }
        state.score = 4321.0;
    }

    engine.tick();

    let state = engine.state();
    assert!(state.game_over);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.high_score, 4321.0);
}

// ---- Purchases ----

#[test]
fn test_buy_upgrade_spends_credits() {
    let mut engine = quiet_engine();
    engine.state_mut().credits = 10_000.0;

    engine.queue_command(PlayerCommand::BuyUpgrade {
        kind: UpgradeKind::BlastRadius,
    });
    engine.tick();

    let state = engine.state();
    assert_eq!(state.upgrades.blast_radius, 1);
    assert_eq!(state.credits, 10_000.0 - 120.0);
    assert_eq!(state.total_spent, 120.0);
}

#[test]
fn test_buy_upgrade_rejected_when_poor_or_maxed() {
    let mut engine = quiet_engine();
    engine.state_mut().credits = 10.0;
    engine.queue_command(PlayerCommand::BuyUpgrade {
        kind: UpgradeKind::BlastRadius,
    });
    engine.tick();
    assert_eq!(engine.state().upgrades.blast_radius, 0);

    let state = engine.state_mut();
    state.credits = 1_000_000.0;
    state.upgrades.multi_shot = 3;
    engine.queue_command(PlayerCommand::BuyUpgrade {
        kind: UpgradeKind::MultiShot,
    });
    engine.tick();
    assert_eq!(engine.state().upgrades.multi_shot, 3);
}

#[test]
fn test_city_repair_requires_and_revives_a_dead_city() {
    let mut engine = quiet_engine();
    engine.state_mut().credits = 10_000.0;

    // All cities standing: the purchase is refused outright.
    engine.queue_command(PlayerCommand::BuyUpgrade {
        kind: UpgradeKind::CityRepair,
    });
    engine.tick();
    assert_eq!(engine.state().upgrades.city_repair, 0);
    assert_eq!(engine.state().credits, 10_000.0);

    {
        let state = engine.state_mut();
        state.cities[2].alive = false;
        state.shield_hits[2] = 3;
    }
    engine.queue_command(PlayerCommand::BuyUpgrade {
        kind: UpgradeKind::CityRepair,
    });
    engine.tick();

    let state = engine.state();
    assert_eq!(state.upgrades.city_repair, 1);
    assert!(state.cities[2].alive);
    assert_eq!(state.shield_hits[2], 0);
}

#[test]
fn test_buy_building_cost_scales() {
    use skyfall_core::economy::BuildingKind;

    let mut engine = quiet_engine();
    engine.state_mut().credits = 1_000.0;
    let first_cost = engine.state().buildings.next_cost(BuildingKind::SolarFarm);

    engine.queue_command(PlayerCommand::BuyBuilding {
        kind: BuildingKind::SolarFarm,
    });
    engine.tick();

    let state = engine.state();
    assert_eq!(state.buildings.count(BuildingKind::SolarFarm), 1);
    assert_eq!(state.credits, 1_000.0 - first_cost);
    assert!(state.buildings.next_cost(BuildingKind::SolarFarm) > first_cost);
}

#[test]
fn test_buildings_generate_income_per_tick() {
    use skyfall_core::economy::BuildingKind;

    let mut engine = quiet_engine();
    *engine
        .state_mut()
        .buildings
        .count_mut(BuildingKind::SolarFarm) = 2;
    let cps = engine.state().buildings.income_per_second();
    assert!(cps > 0.0);
    let credits_before = engine.state().credits;

    engine.tick();

    let state = engine.state();
    assert!((state.credits - credits_before - cps / TICK_RATE as f64).abs() < 1e-9);
    assert_eq!(state.income_rate, cps);
}
