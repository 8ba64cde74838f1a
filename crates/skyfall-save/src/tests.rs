//! Tests for the save codec and the stats store.

use std::fs;

use skyfall_core::entities::Explosion;
use skyfall_core::prestige::{PrestigeBonuses, PrestigeUpgradeKind};
use skyfall_core::state::GameState;
use skyfall_core::stats::PersistentStats;
use skyfall_core::types::Vec2;

use crate::codec::{decode_save, encode_save, SAVE_VERSION};
use crate::store;

fn session_with_entities() -> GameState {
    let mut state = GameState::new_session(&PrestigeBonuses::default());
    state.level = 7;
    state.score = 3456.0;
    state.credits = 789.0;
    state
        .explosions
        .push(Explosion::ignite(77, Vec2::new(100.0, 200.0), 50.0, true));
    state
}

// ---- Codec ----

#[test]
fn test_save_roundtrip_preserves_state() {
    let state = session_with_entities();
    let blob = encode_save(&state).unwrap();
    let restored = decode_save(&blob).expect("current-version save decodes");

    assert_eq!(restored.level, 7);
    assert_eq!(restored.score, 3456.0);
    assert_eq!(restored.explosions.len(), 1);
    assert_eq!(restored.explosions[0].id, 77);
}

#[test]
fn test_decode_resynchronizes_id_generator() {
    let mut state = session_with_entities();
    // A stale counter below the live maximum would hand out duplicates.
    state.next_id = 1;
    let blob = encode_save(&state).unwrap();
    let mut restored = decode_save(&blob).unwrap();

    assert_eq!(restored.next_id, 78);
    let fresh = restored.alloc_id();
    assert!(restored.explosions.iter().all(|e| e.id != fresh));
}

#[test]
fn test_decode_rejects_version_mismatch() {
    let blob = encode_save(&session_with_entities()).unwrap();
    let stale = blob.replacen(
        &format!("\"v\":{SAVE_VERSION}"),
        &format!("\"v\":{}", SAVE_VERSION + 1),
        1,
    );
    assert_ne!(blob, stale);
    assert!(decode_save(&stale).is_none());
}

#[test]
fn test_decode_rejects_malformed_blob() {
    assert!(decode_save("").is_none());
    assert!(decode_save("not json").is_none());
    assert!(decode_save("{\"v\":1}").is_none());
    assert!(decode_save("{\"state\":{}}").is_none());
}

// ---- File store ----

#[test]
fn test_session_file_roundtrip() {
    let dir = std::env::temp_dir().join("skyfall_test_session_roundtrip");
    let _ = fs::remove_dir_all(&dir);

    assert!(store::load_session(&dir).is_none());

    let state = session_with_entities();
    store::save_session(&dir, &state).unwrap();
    let restored = store::load_session(&dir).expect("session restores");
    assert_eq!(restored.level, state.level);

    store::delete_session(&dir).unwrap();
    assert!(store::load_session(&dir).is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_stats_file_roundtrip_and_lenient_load() {
    let dir = std::env::temp_dir().join("skyfall_test_stats_roundtrip");
    let _ = fs::remove_dir_all(&dir);

    // Missing record starts fresh.
    assert_eq!(store::load_stats(&dir), PersistentStats::default());

    let mut stats = PersistentStats::default();
    stats.total_games = 3;
    stats.high_score = 9000.0;
    stats.achievements.push("first_blood".to_string());
    store::save_stats(&dir, &stats).unwrap();
    assert_eq!(store::load_stats(&dir), stats);

    // Older records missing fields still load, defaulted.
    fs::write(dir.join("stats.json"), "{\"total_games\": 12}").unwrap();
    let loaded = store::load_stats(&dir);
    assert_eq!(loaded.total_games, 12);
    assert_eq!(loaded.prestige_points, 0);

    // Corrupt records reset rather than fail.
    fs::write(dir.join("stats.json"), "###").unwrap();
    assert_eq!(store::load_stats(&dir), PersistentStats::default());

    let _ = fs::remove_dir_all(&dir);
}

// ---- Run banking ----

#[test]
fn test_record_run_aggregates_totals() {
    let mut stats = PersistentStats::default();
    stats.high_score = 5000.0;

    let mut state = session_with_entities();
    state.score = 3456.0;
    state.level = 12;
    state.max_combo = 9;
    state.run_missiles_destroyed = 40;
    state.run_bosses_defeated = 2;
    state.run_cities_saved = 31;

    store::record_run(&mut stats, &state);

    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.total_score, 3456.0);
    assert_eq!(stats.high_score, 5000.0);
    assert_eq!(stats.highest_level, 12);
    // Level 12 sits in the third zone.
    assert_eq!(stats.highest_zone, 3);
    assert_eq!(stats.total_missiles_destroyed, 40);
    assert_eq!(stats.total_bosses_defeated, 2);
    assert_eq!(stats.total_cities_saved, 31);
    assert_eq!(stats.best_combo, 9);
}

#[test]
fn test_record_run_skips_autopilot_sessions() {
    let mut stats = PersistentStats::default();
    let mut state = session_with_entities();
    state.auto_mode = true;

    store::record_run(&mut stats, &state);
    assert_eq!(stats, PersistentStats::default());
}

#[test]
fn test_prestige_banking_requires_level_five() {
    let mut stats = PersistentStats::default();
    let mut state = session_with_entities();

    state.level = 4;
    state.score = 50_000.0;
    assert!(store::bank_prestige(&mut stats, &state).is_none());
    assert_eq!(stats.prestige_level, 0);

    state.level = 8;
    state.score = 3_200.0;
    let points = store::bank_prestige(&mut stats, &state).unwrap();
    // floor(3200 / 1000) + 2 * 8
    assert_eq!(points, 19);
    assert_eq!(stats.prestige_level, 1);
    assert_eq!(stats.prestige_points, 19);
}

#[test]
fn test_prestige_purchase_spends_points_and_caps() {
    let mut stats = PersistentStats::default();
    stats.prestige_points = 7;

    assert!(store::buy_prestige_upgrade(
        &mut stats,
        PrestigeUpgradeKind::HeadStart
    ));
    assert_eq!(stats.prestige_points, 3);
    assert_eq!(stats.prestige_bonuses.head_start, 1);

    // Max level 1: a second purchase is refused.
    assert!(!store::buy_prestige_upgrade(
        &mut stats,
        PrestigeUpgradeKind::HeadStart
    ));

    // Three points left cannot afford the five-point city upgrade.
    assert!(!store::buy_prestige_upgrade(
        &mut stats,
        PrestigeUpgradeKind::ToughCities
    ));
    assert_eq!(stats.prestige_points, 3);
}
