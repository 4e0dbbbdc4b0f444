//! Per-tick movement integration
//!
//! Player flight is a smoothed velocity followed by a semi-implicit Euler
//! step. Enemies drift toward the camera while pursuing the player on x/y.

use glam::Vec3;

use super::state::{GameState, Player};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Target velocity for the held directions. Left wins over right, up over down.
pub fn target_velocity(input: &TickInput, speed: f32) -> Vec3 {
    let x = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };
    let y = if input.up {
        speed
    } else if input.down {
        -speed
    } else {
        0.0
    };
    Vec3::new(x, y, 0.0)
}

/// Update the craft's attitude and position from control intent
pub fn fly_player(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let rate = tuning.rotation_speed;
    let bank = tuning.max_bank;

    // Roll follows lateral input
    if input.left {
        player.rotation.z = (player.rotation.z + rate).min(bank);
    } else if input.right {
        player.rotation.z = (player.rotation.z - rate).max(-bank);
    } else {
        player.rotation.z *= tuning.bank_decay;
    }

    // Pitch noses up when climbing
    if input.up {
        player.rotation.x = (player.rotation.x - rate).max(-bank);
    } else if input.down {
        player.rotation.x = (player.rotation.x + rate).min(bank);
    } else {
        player.rotation.x *= tuning.bank_decay;
    }

    // Yaw accumulates and never recenters
    if input.yaw_left {
        player.rotation.y += rate;
    }
    if input.yaw_right {
        player.rotation.y -= rate;
    }

    let target = target_velocity(input, tuning.flight_speed);
    let keep = tuning.velocity_smoothing;
    player.vel = player.vel * keep + target * (1.0 - keep);
    player.pos += player.vel;
}

/// Exponential pursuit: close a fixed fraction of the x/y gap, advance on z
pub fn seek(pos: Vec3, target: Vec3, seek_rate: f32, forward_speed: f32) -> Vec3 {
    Vec3::new(
        pos.x + (target.x - pos.x) * seek_rate,
        pos.y + (target.y - pos.y) * seek_rate,
        pos.z + forward_speed,
    )
}

/// Advance enemies, projectiles and power-ups by one tick
pub fn advance_entities(state: &mut GameState) {
    let tuning = &state.tuning;
    let player_pos = state.player.pos;

    for enemy in &mut state.enemies {
        enemy.pos = seek(
            enemy.pos,
            player_pos,
            tuning.enemy_seek_rate,
            tuning.terrain_speed,
        );
    }

    for bullet in &mut state.bullets {
        bullet.pos.z -= tuning.bullet_speed;
    }

    for bolt in &mut state.enemy_bullets {
        bolt.prev_pos = bolt.pos;
        bolt.pos.z += tuning.enemy_bullet_speed;
    }

    for power_up in &mut state.power_ups {
        power_up.prev_pos = power_up.pos;
        power_up.pos.z += tuning.terrain_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_velocity_smoothing() {
        let tuning = Tuning::default();
        let mut player = Player::new(3);
        let input = held(|i| i.right = true);

        fly_player(&mut player, &input, &tuning);
        assert!((player.vel.x - 0.01).abs() < 1e-6);
        assert!((player.pos.x - 0.01).abs() < 1e-6);

        fly_player(&mut player, &input, &tuning);
        // 0.01 * 0.9 + 0.1 * 0.1
        assert!((player.vel.x - 0.019).abs() < 1e-6);
        assert!((player.pos.x - 0.029).abs() < 1e-6);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.vel.z, 0.0);
    }

    #[test]
    fn test_velocity_converges_to_target() {
        let tuning = Tuning::default();
        let mut player = Player::new(3);
        let input = held(|i| {
            i.left = true;
            i.up = true;
        });
        for _ in 0..200 {
            fly_player(&mut player, &input, &tuning);
        }
        assert!((player.vel.x + 0.1).abs() < 1e-4);
        assert!((player.vel.y - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_bank_clamps_and_decays() {
        let tuning = Tuning::default();
        let mut player = Player::new(3);
        let input = held(|i| {
            i.left = true;
            i.down = true;
        });
        for _ in 0..40 {
            fly_player(&mut player, &input, &tuning);
        }
        assert_eq!(player.roll(), 30.0);
        assert_eq!(player.pitch(), 30.0);

        fly_player(&mut player, &TickInput::default(), &tuning);
        assert!((player.roll() - 27.0).abs() < 1e-4);
        assert!((player.pitch() - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_left_wins_over_right() {
        let input = held(|i| {
            i.left = true;
            i.right = true;
        });
        assert_eq!(target_velocity(&input, 0.1).x, -0.1);
    }

    #[test]
    fn test_yaw_accumulates_without_recentering() {
        let tuning = Tuning::default();
        let mut player = Player::new(3);
        let input = held(|i| i.yaw_left = true);
        for _ in 0..200 {
            fly_player(&mut player, &input, &tuning);
        }
        assert!((player.yaw() - 400.0).abs() < 1e-2);

        for _ in 0..50 {
            fly_player(&mut player, &TickInput::default(), &tuning);
        }
        assert!((player.yaw() - 400.0).abs() < 1e-2);
    }

    #[test]
    fn test_seek_closes_fraction_of_gap() {
        let next = seek(Vec3::new(10.0, -4.0, -30.0), Vec3::ZERO, 0.01, 0.1);
        assert!((next.x - 9.9).abs() < 1e-5);
        assert!((next.y + 3.96).abs() < 1e-5);
        assert!((next.z + 29.9).abs() < 1e-5);
    }

    #[test]
    fn test_streaks_keep_previous_position() {
        let mut state = GameState::new(1);
        state.spawn_enemy_bullet_at(Vec3::new(0.0, 0.0, -10.0));
        state.spawn_power_up_at(Vec3::new(1.0, 1.0, -30.0));
        state.spawn_bullet_at(Vec3::ZERO);

        advance_entities(&mut state);

        let bolt = &state.enemy_bullets[0];
        assert_eq!(bolt.prev_pos.z, -10.0);
        assert!((bolt.pos.z + 9.8).abs() < 1e-5);
        let power_up = &state.power_ups[0];
        assert_eq!(power_up.prev_pos.z, -30.0);
        assert!((power_up.pos.z + 29.9).abs() < 1e-5);
        assert!((state.bullets[0].pos.z + 0.2).abs() < 1e-6);
    }
}
