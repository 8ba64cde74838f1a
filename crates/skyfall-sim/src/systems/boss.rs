//! Boss behavior: patrol, salvo attacks, damage from player blasts.

use rand::Rng;

use skyfall_core::constants::{FIELD_WIDTH, GROUND_Y};
use skyfall_core::entities::{BonusText, Explosion, ThreatMissile};
use skyfall_core::enums::{BossKind, ThreatVariant};
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use super::cosmetics::spawn_particles;
use crate::level::level_config;

pub fn run(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    if state.boss.is_none() || state.boss_defeated {
        return;
    }

    let level = state.level;
    let config = level_config(level);

    // Patrol and countdown on a local copy; threats and particles need the
    // rest of the state mutably.
    let mut boss = state.boss.take().expect("checked above");
    boss.flash_timer = boss.flash_timer.saturating_sub(1);

    boss.position.x += boss.speed * boss.move_dir;
    if boss.position.x > FIELD_WIDTH - 80.0 {
        boss.move_dir = -1.0;
    }
    if boss.position.x < 80.0 {
        boss.move_dir = 1.0;
    }

    boss.attack_timer -= 1;
    if boss.attack_timer <= 0 {
        match boss.kind {
            BossKind::Mothership => {
                boss.attack_timer = i32::max(60, 120 - level as i32 * 2);
                let salvos = 3 + level / 10;
                for _ in 0..salvos {
                    let targets = state.spawn_targets();
                    let tx = if targets.is_empty() {
                        FIELD_WIDTH / 2.0
                    } else {
                        targets[rng.gen_range(0..targets.len())]
                    };
                    let start = Vec2::new(
                        boss.position.x + (rng.gen::<f64>() - 0.5) * 60.0,
                        boss.position.y + 20.0,
                    );
                    push_boss_threat(state, start, tx, config.threat_speed * 1.3, ThreatVariant::Plain);
                }
            }
            BossKind::Fortress => {
                boss.attack_timer = i32::max(80, 150 - level as i32 * 2);
                // Fan of five around straight down.
                for i in 0..5i32 {
                    let angle = -std::f64::consts::FRAC_PI_2 + (i - 2) as f64 * 0.3;
                    let tx = boss.position.x + angle.cos() * 400.0;
                    let start = Vec2::new(boss.position.x, boss.position.y + 15.0);
                    push_boss_threat(state, start, tx, config.threat_speed * 1.1, ThreatVariant::Plain);
                }
            }
            BossKind::SwarmQueen => {
                boss.attack_timer = i32::max(50, 100 - level as i32 * 2);
                for _ in 0..6 {
                    let tx = rng.gen::<f64>() * (FIELD_WIDTH - 100.0) + 50.0;
                    let start = Vec2::new(
                        boss.position.x + (rng.gen::<f64>() - 0.5) * 40.0,
                        boss.position.y + 10.0,
                    );
                    let variant = if rng.gen::<f64>() < 0.3 {
                        ThreatVariant::HeatSeeker
                    } else {
                        ThreatVariant::Plain
                    };
                    let speed = config.threat_speed * 1.5 * (0.8 + rng.gen::<f64>() * 0.4);
                    push_boss_threat(state, start, tx, speed, variant);
                }
            }
        }
        let muzzle_flash = boss.position + Vec2::new(0.0, 15.0);
        spawn_particles(&mut state.particles, rng, muzzle_flash, 6);
    }

    // Player blasts burn the boss; hostile and chain blasts do not.
    let hit_radius = boss.kind.hit_radius();
    let blasts: Vec<(Vec2, f64)> = state
        .explosions
        .iter()
        .filter(|e| e.from_player && e.radius > 0.0)
        .map(|e| (e.center, e.radius))
        .collect();
    for (center, radius) in blasts {
        if boss.position.distance(center) < radius + hit_radius {
            boss.hp -= (radius / 10.0).ceil() as i32;
            boss.flash_timer = 8;
            spawn_particles(&mut state.particles, rng, boss.position, 5);
        }
    }

    if boss.hp <= 0 {
        state.boss_defeated = true;
        state.boss = None;
        state.screen_shake = 20.0;
        let bonus = 200.0 + level as f64 * 20.0;
        state.score += bonus;
        state.credits += bonus;
        state.run_bosses_defeated += 1;
        spawn_particles(&mut state.particles, rng, boss.position, 130);
        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, boss.position, 120.0, false));
        state.bonus_text.push(BonusText {
            text: format!("BOSS DESTROYED +{bonus}"),
            position: boss.position - Vec2::new(0.0, 30.0),
            life: 150,
        });
        events.push(GameEvent::BossDefeated {
            kind: boss.kind,
            bonus,
        });
    } else {
        state.boss = Some(boss);
    }
}

fn push_boss_threat(
    state: &mut GameState,
    start: Vec2,
    target_x: f64,
    speed: f64,
    variant: ThreatVariant,
) {
    let threat = ThreatMissile {
        id: state.alloc_id(),
        start,
        target: Vec2::new(target_x, GROUND_Y),
        progress: 0.0,
        speed,
        destroyed: false,
        variant,
        frozen: false,
        frozen_timer: 0,
    };
    state.threats.push(threat);
}
