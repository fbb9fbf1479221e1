//! Space Rocks - an Asteroids-style arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, game state machine)
//! - `renderer`: WebGPU rendering of the simulation
//! - `audio`: Sound effect capability and the Web Audio synthesizer
//! - `tuning`: Data-driven timing and pacing
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SetupError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default playfield size in pixels
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Duration of the reference frame that per-frame rates are expressed in (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Ship rotation (radians per frame)
    pub const SHIP_ROTATION_RATE: f32 = 0.07;
    /// Thrust added per frame while moving
    pub const SHIP_THRUST: f32 = 0.1;
    /// Thrust added per frame when starting from rest
    pub const SHIP_THRUST_KICK: f32 = 0.15;
    /// Speeds with both components below this (per frame) snap to zero
    pub const SHIP_MIN_SPEED: f32 = 0.1;
    /// Speed cap (pixels per frame)
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    /// Coarse collision radius
    pub const SHIP_RADIUS: f32 = 14.0;
    /// How far the ship travels off-screen before wrapping
    pub const SHIP_WRAP_MARGIN: f32 = 40.0;
    /// Ship outline in local coordinates (0 = heading up)
    pub const SHIP_NOSE: Vec2 = Vec2::new(0.0, -10.0);
    pub const SHIP_LEFT_FOOT: Vec2 = Vec2::new(-12.0, 10.0);
    pub const SHIP_RIGHT_FOOT: Vec2 = Vec2::new(12.0, 10.0);

    /// Bullet speed (pixels per frame)
    pub const BULLET_SPEED: f32 = 4.0;
    /// Bullet lifetime in frames
    pub const BULLET_LIFE_FRAMES: f32 = 80.0;

    /// Radius of a full-size rock
    pub const ROCK_RADIUS: f32 = 36.0;
    pub const ROCK_WRAP_MARGIN: f32 = 30.0;
    /// Distance outside the screen edge where new rocks appear
    pub const ROCK_SPAWN_OFFSET: f32 = 38.0;
    /// Pixels per millisecond before the per-rock speed factor
    pub const ROCK_TRAVEL_FACTOR: f32 = 1.0 / 8.0;
    /// Radians per millisecond before the per-rock spin factor
    pub const ROCK_SPIN_FACTOR: f32 = 0.01 / 8.0;
    /// Scale by stage (0 = smallest)
    pub const ROCK_SCALES: [f32; 3] = [0.25, 0.5, 1.0];
    pub const ROCK_SPEEDS: [f32; 4] = [1.0, 1.5, 2.0, 2.5];
    pub const ROCK_SPINS: [f32; 4] = [1.0, 2.5, 5.0, 10.0];
    /// Stage of rocks spawned at level start
    pub const ROCK_MAX_STAGE: u8 = 2;
    /// Fragment direction offset from the parent (degrees)
    pub const ROCK_SPREAD_DEG: f32 = 25.0;
    /// Half-width of the forbidden bands around the cardinal directions (degrees)
    pub const ROCK_CLAMP_DEG: f32 = 20.0;
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: consts::ARENA_WIDTH,
            height: consts::ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Normalize any angle to [0, 2π)
#[inline]
pub fn reduce_zero_two_pi(radians: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let r = radians % tau;
    let r = if r < 0.0 { r + tau } else { r };
    // A tiny negative remainder can round up to exactly 2π
    if r >= tau { 0.0 } else { r }
}

#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt()
}

#[inline]
pub fn distance_from_origin(p: Vec2) -> f32 {
    (p.x * p.x + p.y * p.y).sqrt()
}

/// Rotate a point around the origin (screen coordinates, y down: positive = clockwise)
#[inline]
pub fn rotate_around_origin(p: Vec2, radians: f32) -> Vec2 {
    let (s, c) = radians.sin_cos();
    Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

/// Rotate an absolute point around a pivot
pub fn rotate_around_pivot(pivot: Vec2, point: Vec2, radians: f32) -> Vec2 {
    rotate_around_origin(point - pivot, radians) + pivot
}

/// Heading vector for an angle where 0 points up the screen
#[inline]
pub fn heading(radians: f32) -> Vec2 {
    Vec2::new(radians.sin(), -radians.cos())
}

/// Wrap one coordinate across a screen axis once it is more than `margin` off-screen
#[inline]
pub fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value > extent + margin {
        -margin
    } else if value < -margin {
        extent + margin
    } else {
        value
    }
}

/// Elapsed time expressed in reference frames
#[inline]
pub fn frame_scale(delta_ms: f32) -> f32 {
    delta_ms / consts::FRAME_MS
}
