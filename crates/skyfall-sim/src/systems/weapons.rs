//! Interceptor launches and special weapons: laser, swarm, mines.

use rand::Rng;

use skyfall_core::constants::{
    COMBO_MULTIPLIER_CAP, COMBO_WINDOW, LASER_BOSS_DAMAGE, LASER_BOSS_WIDTH, LASER_HIT_WIDTH,
    LASER_KILL_SCORE, LASER_LIFE, MINE_ARM_DELAY, MINE_LIFE, SWARM_COUNT,
};
use skyfall_core::entities::{BonusText, Explosion, Interceptor, LaserBeam, Mine};
use skyfall_core::enums::WeaponKind;
use skyfall_core::events::GameEvent;
use skyfall_core::state::GameState;
use skyfall_core::types::Vec2;

use super::cosmetics::spawn_particles;

/// Closest battery able to fire. The autopilot treats batteries as always
/// stocked; manual play requires ammo.
pub fn closest_ready_battery(state: &GameState, target: Vec2) -> Option<usize> {
    state
        .batteries
        .iter()
        .enumerate()
        .filter(|(_, b)| (state.auto_mode || b.ammo > 0) && b.disabled == 0)
        .min_by(|(_, a), (_, b)| {
            a.muzzle()
                .distance(target)
                .total_cmp(&b.muzzle().distance(target))
        })
        .map(|(i, _)| i)
}

/// Launch one interceptor at `target` from the closest ready battery.
/// `consume_ammo` is false for free follow-up shots (multishot extras,
/// swarm spread). Returns false when no battery can fire.
pub fn fire_interceptor(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    target: Vec2,
    consume_ammo: bool,
) -> bool {
    let Some(bi) = closest_ready_battery(state, target) else {
        return false;
    };
    if !state.auto_mode && consume_ammo {
        state.batteries[bi].ammo -= 1;
    }
    let start = state.batteries[bi].muzzle();
    let interceptor = Interceptor {
        id: state.alloc_id(),
        start,
        target,
        progress: 0.0,
        speed: state.upgrades.interceptor_speed(),
        arrived: false,
    };
    state.interceptors.push(interceptor);
    events.push(GameEvent::InterceptorLaunched { battery: bi });
    true
}

/// Spend one charge of the selected weapon at the aim point. Returns true
/// if a discharge happened.
pub fn discharge(
    state: &mut GameState,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
    kind: WeaponKind,
    at: Vec2,
) -> bool {
    let Some(slot) = state.weapon_slot(kind) else {
        return false;
    };
    if slot.charges == 0 {
        return false;
    }

    match kind {
        WeaponKind::Laser => {
            let Some(bi) = closest_ready_battery(state, at) else {
                return false;
            };
            let start = state.batteries[bi].muzzle();
            let beam = LaserBeam {
                id: state.alloc_id(),
                start,
                end: at,
                life: LASER_LIFE,
                max_life: LASER_LIFE,
            };
            state.lasers.push(beam);
            state.screen_shake = 4.0;
        }
        WeaponKind::Swarm => {
            for i in 0..SWARM_COUNT {
                let angle = (i as f64 / SWARM_COUNT as f64) * std::f64::consts::TAU;
                let spread = 40.0 + rng.gen::<f64>() * 20.0;
                let target = at + Vec2::new(angle.cos() * spread, angle.sin() * spread);
                fire_interceptor(state, events, target, false);
            }
        }
        WeaponKind::Mine => {
            let radius = state.upgrades.explosion_radius() * 1.2;
            let mine = Mine {
                id: state.alloc_id(),
                position: at,
                radius,
                life: MINE_LIFE,
                max_life: MINE_LIFE,
                armed: false,
            };
            state.mines.push(mine);
        }
    }

    let slot = state
        .weapon_slot_mut(kind)
        .expect("slot presence checked above");
    slot.charges -= 1;
    let emptied = slot.charges == 0;
    if emptied && state.selected_weapon == Some(kind) {
        state.selected_weapon = None;
    }
    state.mark_weapon_used(kind);
    events.push(GameEvent::WeaponFired { kind });
    true
}

/// Mine upkeep: count down life, arm after the delay, detonate on
/// proximity to any live threat or the boss.
pub fn run_mines(state: &mut GameState, rng: &mut impl Rng) {
    for mine in &mut state.mines {
        mine.life = mine.life.saturating_sub(1);
        if !mine.armed && mine.life < mine.max_life - MINE_ARM_DELAY {
            mine.armed = true;
        }
    }

    let blast_radius = state.upgrades.explosion_radius() * 1.5;
    let mut detonations: Vec<Vec2> = Vec::new();
    let threats = &state.threats;
    let boss = state.boss.as_ref().filter(|_| !state.boss_defeated);
    state.mines.retain(|mine| {
        if mine.life == 0 {
            return false;
        }
        if !mine.armed {
            return true;
        }
        let near_threat = threats
            .iter()
            .any(|m| !m.destroyed && m.position().distance(mine.position) < mine.radius);
        let near_boss = boss
            .map(|b| b.position.distance(mine.position) < mine.radius + 30.0)
            .unwrap_or(false);
        if near_threat || near_boss {
            detonations.push(mine.position);
            false
        } else {
            true
        }
    });

    for at in detonations {
        let id = state.alloc_id();
        state
            .explosions
            .push(Explosion::ignite(id, at, blast_radius, true));
        spawn_particles(&mut state.particles, rng, at, 20);
        state.screen_shake = 6.0;
    }
}

/// Laser upkeep: age beams, kill threats in the corridor, burn the boss.
/// Laser kills score at the multiplier in effect when the beam connects.
pub fn run_lasers(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    for lb in &mut state.lasers {
        lb.life = lb.life.saturating_sub(1);
    }
    state.lasers.retain(|lb| lb.life > 0);

    let beams: Vec<(Vec2, Vec2)> = state.lasers.iter().map(|lb| (lb.start, lb.end)).collect();
    for (start, end) in beams {
        let seg = end - start;
        let len = seg.length();
        if len == 0.0 {
            continue;
        }
        let n = seg / len;

        for i in 0..state.threats.len() {
            if state.threats[i].destroyed {
                continue;
            }
            let pos = state.threats[i].position();
            let rel = pos - start;
            let proj = rel.dot(n);
            if proj < 0.0 || proj > len {
                continue;
            }
            let perp = (rel.x * n.y - rel.y * n.x).abs();
            if perp >= LASER_HIT_WIDTH {
                continue;
            }
            state.threats[i].destroyed = true;
            if !state.threats[i].variant.is_decoy() {
                let gain = LASER_KILL_SCORE * state.combo_multiplier as f64;
                state.score += gain;
                state.credits += gain;
                state.run_missiles_destroyed += 1;
                state.combo_count += 1;
                state.combo_timer = COMBO_WINDOW;
                state.combo_multiplier =
                    u32::min(state.combo_count / 2 + 1, COMBO_MULTIPLIER_CAP);
                state.max_combo = state.max_combo.max(state.combo_count);
                state.bonus_text.push(BonusText {
                    text: format!("+{gain}"),
                    position: pos,
                    life: 60,
                });
                events.push(GameEvent::ThreatDestroyed {
                    threat_id: state.threats[i].id,
                    score: gain,
                });
            }
            spawn_particles(&mut state.particles, rng, pos, 8);
        }

        if let Some(boss) = state.boss.as_mut().filter(|_| !state.boss_defeated) {
            let rel = boss.position - start;
            let proj = rel.dot(n);
            if proj >= 0.0 && proj <= len {
                let perp = (rel.x * n.y - rel.y * n.x).abs();
                if perp < LASER_BOSS_WIDTH {
                    boss.hp -= LASER_BOSS_DAMAGE;
                    boss.flash_timer = 8;
                    let at = boss.position;
                    spawn_particles(&mut state.particles, rng, at, 3);
                }
            }
        }
    }
}
