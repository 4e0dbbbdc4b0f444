//! Collision detection and damage resolution
//!
//! Every test is a per-axis box proximity check (`crate::within_box`). Each
//! pass scans one collection, records the ids it destroys and compacts the
//! collection once at the end, so an entity is never removed twice and never
//! skipped by the scan that removes its neighbour.

use std::collections::HashSet;

use glam::Vec3;

use super::state::{Explosion, GameEvent, GamePhase, GameState, Player};
use crate::within_box;

/// What a collision pass destroyed this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_removed: Vec<u32>,
    pub bullets_removed: Vec<u32>,
    pub enemy_bullets_removed: Vec<u32>,
    pub power_ups_removed: Vec<u32>,
    /// Ids of explosions spawned by bullet kills
    pub explosions_spawned: Vec<u32>,
    /// Points awarded this tick
    pub score_gained: u64,
    /// Health reached zero during this pass
    pub game_over: bool,
}

impl CollisionReport {
    /// Every id this report touched (removed or spawned)
    pub fn all_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.enemies_removed
            .iter()
            .chain(&self.bullets_removed)
            .chain(&self.enemy_bullets_removed)
            .chain(&self.power_ups_removed)
            .chain(&self.explosions_spawned)
            .copied()
    }
}

/// Remove every entity whose id is in `removed`, preserving order
fn compact<T>(items: &mut Vec<T>, removed: &[u32], id_of: impl Fn(&T) -> u32) {
    if removed.is_empty() {
        return;
    }
    let doomed: HashSet<u32> = removed.iter().copied().collect();
    debug_assert_eq!(doomed.len(), removed.len(), "entity marked twice");
    let before = items.len();
    items.retain(|item| !doomed.contains(&id_of(item)));
    debug_assert_eq!(before - items.len(), removed.len(), "removal missed a live entity");
}

/// Take one point of damage. Returns true when the player is out of health.
fn hurt(player: &mut Player, events: &mut Vec<GameEvent>) -> bool {
    player.health = player.health.saturating_sub(1);
    events.push(GameEvent::PlayerHit {
        health: player.health,
    });
    player.health == 0
}

fn enter_game_over(state: &mut GameState, report: &mut CollisionReport) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    report.game_over = true;
    log::info!("Game over at tick {} with {} pts", state.time_ticks, state.score);
}

/// Enemies: expiry behind the player, then contact with the craft
fn resolve_enemy_contacts(state: &mut GameState, report: &mut CollisionReport) {
    let despawn_z = state.tuning.enemy_despawn_z;
    let contact = state.tuning.enemy_contact_box;
    let mut removed = Vec::new();
    let mut dead = false;

    for enemy in &state.enemies {
        if enemy.pos.z > despawn_z {
            removed.push(enemy.id);
            continue;
        }
        if within_box(enemy.pos, state.player.pos, contact) {
            removed.push(enemy.id);
            log::debug!("Enemy {} rammed the player", enemy.id);
            if hurt(&mut state.player, &mut state.events) {
                dead = true;
                break;
            }
        }
    }

    compact(&mut state.enemies, &removed, |e| e.id);
    report.enemies_removed.extend(removed);
    if dead {
        enter_game_over(state, report);
    }
}

/// Enemy laser bolts: expiry, then hits on the craft
fn resolve_enemy_bullets(state: &mut GameState, report: &mut CollisionReport) {
    let despawn_z = state.tuning.enemy_bullet_despawn_z;
    let hit_box = state.tuning.enemy_bullet_box;
    let mut removed = Vec::new();
    let mut dead = false;

    for bolt in &state.enemy_bullets {
        if bolt.pos.z > despawn_z {
            removed.push(bolt.id);
            continue;
        }
        if within_box(bolt.pos, state.player.pos, hit_box) {
            removed.push(bolt.id);
            if hurt(&mut state.player, &mut state.events) {
                dead = true;
                break;
            }
        }
    }

    compact(&mut state.enemy_bullets, &removed, |b| b.id);
    report.enemy_bullets_removed.extend(removed);
    if dead {
        enter_game_over(state, report);
    }
}

/// Power-ups: expiry, then pickup (heal capped at max health)
fn resolve_power_ups(state: &mut GameState, report: &mut CollisionReport) {
    let despawn_z = state.tuning.power_up_despawn_z;
    let pickup_box = state.tuning.power_up_box;
    let max_health = state.tuning.max_health;
    let mut removed = Vec::new();

    for power_up in &state.power_ups {
        if power_up.pos.z > despawn_z {
            removed.push(power_up.id);
            continue;
        }
        if within_box(power_up.pos, state.player.pos, pickup_box) {
            removed.push(power_up.id);
            state.player.health = state.player.health.saturating_add(1).min(max_health);
            state.events.push(GameEvent::PowerUpCollected {
                health: state.player.health,
            });
        }
    }

    compact(&mut state.power_ups, &removed, |p| p.id);
    report.power_ups_removed.extend(removed);
}

/// Player bullets: expiry, then the first live enemy in spawn order that the
/// bullet touches. A bullet resolves at most one enemy per tick.
fn resolve_bullet_hits(state: &mut GameState, report: &mut CollisionReport) {
    let despawn_z = state.tuning.bullet_despawn_z;
    let hit_box = state.tuning.bullet_hit_box;
    let mut spent = Vec::new();
    let mut killed: Vec<u32> = Vec::new();
    let mut blasts: Vec<Vec3> = Vec::new();

    for bullet in &state.bullets {
        if bullet.pos.z < despawn_z {
            spent.push(bullet.id);
            continue;
        }
        let target = state
            .enemies
            .iter()
            .filter(|e| !killed.contains(&e.id))
            .find(|e| within_box(bullet.pos, e.pos, hit_box));
        if let Some(enemy) = target {
            spent.push(bullet.id);
            killed.push(enemy.id);
            blasts.push(enemy.pos);
        }
    }

    compact(&mut state.bullets, &spent, |b| b.id);
    compact(&mut state.enemies, &killed, |e| e.id);

    for (enemy_id, pos) in killed.iter().zip(blasts) {
        let id = state.next_entity_id();
        let explosion = Explosion::spawn(id, pos, &state.tuning, &mut state.rng);
        state.explosions.push(explosion);
        state.score += state.tuning.score_per_kill;
        report.score_gained += state.tuning.score_per_kill;
        report.explosions_spawned.push(id);
        state.events.push(GameEvent::EnemyDestroyed { pos });
        log::debug!("Enemy {} destroyed at {:?}, score {}", enemy_id, pos, state.score);
    }

    report.bullets_removed.extend(spent);
    report.enemies_removed.extend(killed);
}

/// Ram pass: enemies expire or hit the craft.
///
/// Runs before the enemy fire timer so only survivors fire this tick.
pub fn resolve_rams(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    resolve_enemy_contacts(state, &mut report);
    report
}

/// Remaining passes: enemy bolts, power-ups, then player bullets.
/// Does nothing once `report.game_over` is set.
pub fn resolve_hits(state: &mut GameState, report: &mut CollisionReport) {
    if report.game_over {
        return;
    }
    resolve_enemy_bullets(state, report);
    if report.game_over {
        return;
    }
    resolve_power_ups(state, report);
    resolve_bullet_hits(state, report);
}

/// Run every collision pass for this tick.
///
/// Stops as soon as the player runs out of health; the caller must not run
/// anything else for the tick once `report.game_over` is set.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = resolve_rams(state);
    resolve_hits(state, &mut report);
    report
}
