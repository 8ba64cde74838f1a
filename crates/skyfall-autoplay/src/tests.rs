//! Tests for target scoring and the autopilot driver.

use skyfall_core::commands::PlayerCommand;
use skyfall_core::constants::GROUND_Y;
use skyfall_core::entities::{Boss, Interceptor, ThreatMissile};
use skyfall_core::enums::{BossKind, Phase, ThreatVariant};
use skyfall_core::prestige::PrestigeBonuses;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;
use skyfall_core::upgrades::UpgradeKind;

use crate::pilot::AutoPilot;
use crate::targeting::find_best_target;

fn playing_state() -> GameState {
    let mut state = GameState::new_session(&PrestigeBonuses::default());
    state.phase = Phase::Playing;
    state
}

/// Threat positioned at the given height by solving for progress.
fn threat_at(id: u32, x: f64, y: f64, speed: f64) -> ThreatMissile {
    let start = Vec2::new(x, -10.0);
    let target = Vec2::new(x, GROUND_Y);
    let progress = (y - start.y) / (target.y - start.y);
    ThreatMissile {
        id,
        start,
        target,
        progress,
        speed,
        destroyed: false,
        variant: ThreatVariant::Plain,
        frozen: false,
        frozen_timer: 0,
    }
}

#[test]
fn test_targeting_prefers_lowest_threat() {
    let mut state = playing_state();
    state.threats.push(threat_at(1, 200.0, 150.0, 1.0));
    state.threats.push(threat_at(2, 700.0, 450.0, 1.0));

    let aim = find_best_target(&state).expect("two valid targets");
    assert!((aim.x - 700.0).abs() < 50.0, "picked the low threat");
}

#[test]
fn test_targeting_demotes_decoys() {
    let mut state = playing_state();
    let mut decoy = threat_at(1, 700.0, 460.0, 1.0);
    decoy.variant = ThreatVariant::Decoy;
    state.threats.push(decoy);
    state.threats.push(threat_at(2, 200.0, 400.0, 1.0));

    let aim = find_best_target(&state).expect("two valid targets");
    assert!(
        (aim.x - 200.0).abs() < 50.0,
        "picked the live warhead over the lower decoy"
    );
}

#[test]
fn test_targeting_demotes_already_covered() {
    let mut state = playing_state();
    state.threats.push(threat_at(1, 700.0, 450.0, 1.0));
    state.threats.push(threat_at(2, 200.0, 400.0, 1.0));
    // An interceptor already flying at the lower threat's position.
    state.interceptors.push(Interceptor {
        id: 50,
        start: Vec2::new(480.0, GROUND_Y - 18.0),
        target: Vec2::new(700.0, 450.0),
        progress: 0.5,
        speed: 6.0,
        arrived: false,
    });

    let aim = find_best_target(&state).expect("two valid targets");
    assert!((aim.x - 200.0).abs() < 50.0, "covered threat was demoted");
}

#[test]
fn test_targeting_ranks_boss_against_missiles() {
    let mut state = playing_state();
    // A missile still far from the ground loses to a full-strength boss.
    state.threats.push(threat_at(1, 200.0, 200.0, 1.0));
    state.boss = Some(Boss {
        id: 90,
        position: Vec2::new(700.0, 120.0),
        hp: 300,
        max_hp: 300,
        kind: BossKind::Mothership,
        attack_timer: 60,
        move_dir: 1.0,
        speed: 0.5,
        flash_timer: 0,
    });

    let aim = find_best_target(&state).expect("boss is a valid target");
    assert!((aim.x - 700.0).abs() < 50.0, "picked the boss");
}

#[test]
fn test_targeting_skips_high_threats() {
    let mut state = playing_state();
    state.threats.push(threat_at(1, 480.0, 20.0, 1.0));
    assert!(find_best_target(&state).is_none());
}

#[test]
fn test_targeting_ignores_destroyed() {
    let mut state = playing_state();
    let mut dead = threat_at(1, 480.0, 400.0, 1.0);
    dead.destroyed = true;
    state.threats.push(dead);
    assert!(find_best_target(&state).is_none());
}

#[test]
fn test_pilot_starts_from_title() {
    let state = GameState::new_session(&PrestigeBonuses::default());
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());
    let commands = pilot.update(&state);
    assert!(matches!(commands.as_slice(), [PlayerCommand::StartGame]));
}

#[test]
fn test_pilot_restarts_after_game_over() {
    let mut state = playing_state();
    state.phase = Phase::GameOver;
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    let mut saw_restart = false;
    for _ in 0..200 {
        for command in pilot.update(&state) {
            if matches!(command, PlayerCommand::NewGame { .. }) {
                saw_restart = true;
            }
        }
    }
    assert!(saw_restart);
}

#[test]
fn test_pilot_buys_priority_upgrade_in_shop() {
    let mut state = playing_state();
    state.phase = Phase::Shop;
    state.credits = 100_000.0;
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    let mut first_buy = None;
    for _ in 0..40 {
        for command in pilot.update(&state) {
            if let PlayerCommand::BuyUpgrade { kind } = command {
                first_buy.get_or_insert(kind);
            }
        }
        if first_buy.is_some() {
            break;
        }
    }
    assert_eq!(first_buy, Some(UpgradeKind::BlastRadius));
}

#[test]
fn test_pilot_leaves_shop_when_broke() {
    let mut state = playing_state();
    state.phase = Phase::Shop;
    state.credits = 0.0;
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    let mut advanced = false;
    for _ in 0..400 {
        for command in pilot.update(&state) {
            if matches!(command, PlayerCommand::AdvanceLevel) {
                advanced = true;
            }
        }
    }
    assert!(advanced);
}

#[test]
fn test_pilot_fires_at_live_threats() {
    let mut state = playing_state();
    state.threats.push(threat_at(1, 300.0, 300.0, 1.0));
    state.threats.push(threat_at(2, 500.0, 350.0, 1.0));
    state.threats.push(threat_at(3, 700.0, 250.0, 1.0));
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    let mut fired = false;
    for _ in 0..30 {
        for command in pilot.update(&state) {
            if matches!(command, PlayerCommand::FireAt { .. }) {
                fired = true;
            }
        }
    }
    assert!(fired, "three live threats warrant fire within 30 ticks");
}

#[test]
fn test_pilot_holds_fire_without_ammo() {
    let mut state = playing_state();
    state.threats.push(threat_at(1, 300.0, 300.0, 1.0));
    for b in &mut state.batteries {
        b.ammo = 0;
    }
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    for _ in 0..60 {
        assert!(pilot
            .update(&state)
            .iter()
            .all(|c| !matches!(c, PlayerCommand::FireAt { .. })));
    }
}

#[test]
fn test_pilot_idles_through_level_transition() {
    let mut state = playing_state();
    state.level_complete = true;
    state.threats.push(threat_at(1, 300.0, 300.0, 1.0));
    let mut pilot = AutoPilot::new(PrestigeBonuses::default());

    for _ in 0..60 {
        assert!(pilot.update(&state).is_empty());
    }
}
