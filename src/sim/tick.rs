//! Per-frame simulation step
//!
//! One call advances the game by `delta_ms`. Every phase except the intro
//! runs the shared [`playable`] pass, whose order is fixed: input, ship
//! travel, firing, bullets, rocks, bullet/rock hits, rock/ship hits.

use super::bullet::Bullet;
use super::collision::{Circle, circles_overlap, point_in_circle, triangle_collides_circle};
use super::input::{Key, KeyState};
use super::rock::Rock;
use super::state::{GamePhase, GameState};
use crate::audio::{SoundBoard, SoundEffect};

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    keys: &impl KeyState,
    sound: &mut impl SoundBoard,
    delta_ms: f32,
) {
    match state.phase {
        GamePhase::Intro => {}
        GamePhase::StartingLevel => starting_level(state, keys, sound, delta_ms),
        GamePhase::Playing => playing(state, keys, sound, delta_ms),
        GamePhase::Destroyed => destroyed(state, keys, sound, delta_ms),
        GamePhase::GameOver => game_over(state, keys, sound, delta_ms),
    }
}

fn starting_level(
    state: &mut GameState,
    keys: &impl KeyState,
    sound: &mut impl SoundBoard,
    delta: f32,
) {
    state.starting_level_wait += delta;
    if state.starting_level_wait >= state.tuning.level_start_wait_ms {
        state.starting_level_wait = 0.0;
        state.level += 1;

        let arena = state.arena;
        let count = state.tuning.rocks_per_level;
        state.rocks = (0..count)
            .map(|_| Rock::build_random(&mut state.rng, arena))
            .collect();
        state.phase = GamePhase::Playing;
        log::info!("Level {} started with {} rocks", state.level, count);
    }

    playable(state, keys, sound, delta);
}

fn playing(state: &mut GameState, keys: &impl KeyState, sound: &mut impl SoundBoard, delta: f32) {
    playable(state, keys, sound, delta);

    if state.phase == GamePhase::Playing && state.rocks.is_empty() {
        log::info!("Level {} cleared (score {})", state.level, state.score);
        sound.stop(SoundEffect::Thrust);
        state.phase = GamePhase::StartingLevel;
    }
}

fn destroyed(state: &mut GameState, keys: &impl KeyState, sound: &mut impl SoundBoard, delta: f32) {
    playable(state, keys, sound, delta);

    state.ship_collision_duration += delta;
    if state.ship_collision_duration < state.tuning.respawn_wait_ms {
        return;
    }

    if state.lives < 1 {
        state.ship_collision_duration = 0.0;
        if state.score > state.hi_score {
            state.hi_score = state.score;
        }
        log::info!("Game over: score {}, hi-score {}", state.score, state.hi_score);
        state.phase = GamePhase::GameOver;
        return;
    }

    // Rocks near the spawn point hold the respawn; the timer keeps running
    // so the check repeats every frame until the center is clear
    let safe_zone = Circle::new(state.arena.center(), state.tuning.safe_zone_radius);
    if state
        .rocks
        .iter()
        .any(|rock| circles_overlap(&safe_zone, &rock.as_circle()))
    {
        log::debug!("Respawn delayed, rocks near the center");
        return;
    }

    state.ship_collision_duration = 0.0;
    state.ship.set_destroyed(false);
    state.ship.reset();
    state.phase = GamePhase::Playing;
    log::info!("Ship respawned ({} left)", state.lives);
}

fn game_over(state: &mut GameState, keys: &impl KeyState, sound: &mut impl SoundBoard, delta: f32) {
    playable(state, keys, sound, delta);

    state.game_over_wait += delta;
    if state.game_over_wait < state.tuning.game_over_wait_ms {
        return;
    }
    state.game_over_wait = 0.0;

    state.lives = state.tuning.lives;
    state.score = 0;
    state.ship.set_destroyed(false);
    state.ship.reset();
    state.phase = GamePhase::StartingLevel;
    log::info!("Restarting with {} ships", state.lives);
}

/// Shared body of every in-game phase
fn playable(state: &mut GameState, keys: &impl KeyState, sound: &mut impl SoundBoard, delta: f32) {
    // Steering
    if state.phase == GamePhase::Playing {
        if keys.is_key_pressed(Key::RotateLeft) {
            state.ship.rotate_left(delta);
        }
        if keys.is_key_pressed(Key::RotateRight) {
            state.ship.rotate_right(delta);
        }
        if keys.is_key_pressed(Key::Thrust) {
            state.ship.accelerate(delta);
            if !sound.is_playing(SoundEffect::Thrust) {
                sound.play(SoundEffect::Thrust);
            }
        } else {
            sound.stop(SoundEffect::Thrust);
        }
    }
    state.ship.travel(delta);

    // Fire
    state.last_bullet_fire_wait += delta;
    if state.phase == GamePhase::Playing
        && keys.is_key_pressed(Key::Fire)
        && state.last_bullet_fire_wait >= state.tuning.fire_interval_ms
    {
        state.last_bullet_fire_wait = 0.0;
        state
            .bullets
            .push(Bullet::new(state.ship.firing_head_position(), state.ship.spin));
        sound.play(SoundEffect::Fire);
    }

    state.bullets.retain_mut(|bullet| bullet.travel(delta));

    for rock in &mut state.rocks {
        rock.animate(delta);
    }

    // Bullet hits rock: each bullet takes out at most one rock
    let mut i = 0;
    while i < state.bullets.len() {
        let position = state.bullets[i].position;
        let hit = state
            .rocks
            .iter()
            .position(|rock| point_in_circle(position, &rock.as_circle()));

        let Some(hit) = hit else {
            i += 1;
            continue;
        };

        state.bullets.remove(i);
        let rock = state.rocks.remove(hit);
        if let Some(fragments) = rock.explode(&mut state.rng) {
            state.rocks.extend(fragments);
        }
        state.score += 1;
        sound.play(SoundEffect::BangSmall);
        log::debug!("Rock hit at stage {} (score {})", rock.stage(), state.score);
    }

    if matches!(state.phase, GamePhase::Destroyed | GamePhase::GameOver) {
        return;
    }

    // Rock hits ship: coarse circle first, then the hull triangle
    let ship_circle = state.ship.as_circle();
    let mut ship_triangle = None;
    for rock in &state.rocks {
        let rock_circle = rock.as_circle();
        if !circles_overlap(&ship_circle, &rock_circle) {
            continue;
        }
        let triangle = ship_triangle.get_or_insert_with(|| state.ship.as_triangle());
        if triangle_collides_circle(triangle, &rock_circle) {
            // One ship per frame, however many rocks touch it
            state.phase = GamePhase::Destroyed;
            state.ship.set_destroyed(true);
            state.lives = state.lives.saturating_sub(1);
            sound.stop(SoundEffect::Thrust);
            sound.play(SoundEffect::BangLarge);
            log::info!("Ship destroyed ({} left)", state.lives);
            break;
        }
    }
}
