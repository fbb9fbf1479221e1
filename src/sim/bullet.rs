//! Bullets fired by the ship

use glam::Vec2;

use crate::consts::{BULLET_LIFE_FRAMES, BULLET_SPEED, FRAME_MS};
use crate::{frame_scale, heading};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub position: Vec2,
    /// Direction of travel, fixed at creation (radians, 0 = up)
    angle: f32,
    /// Milliseconds left before the bullet fizzles out
    time_to_live: f32,
}

impl Bullet {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            angle,
            time_to_live: BULLET_LIFE_FRAMES * FRAME_MS,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn time_to_live(&self) -> f32 {
        self.time_to_live
    }

    /// Move along the firing direction.
    ///
    /// Returns false once the bullet has run out of time; the caller removes it.
    pub fn travel(&mut self, delta: f32) -> bool {
        self.position += heading(self.angle) * BULLET_SPEED * frame_scale(delta);
        self.time_to_live -= delta;
        self.time_to_live > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_travels_up_at_zero_angle() {
        let mut b = Bullet::new(Vec2::new(100.0, 100.0), 0.0);
        assert!(b.travel(FRAME_MS));
        assert!((b.position - Vec2::new(100.0, 96.0)).length() < 1e-4);
    }

    #[test]
    fn test_travels_right_at_quarter_turn() {
        let mut b = Bullet::new(Vec2::new(100.0, 100.0), FRAC_PI_2);
        b.travel(FRAME_MS * 2.0);
        assert!((b.position - Vec2::new(108.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut b = Bullet::new(Vec2::ZERO, 0.0);
        let lifetime = BULLET_LIFE_FRAMES * FRAME_MS;
        assert!(b.travel(lifetime - 1.0));
        assert!(!b.travel(1.0));
    }

    #[test]
    fn test_large_step_expires_at_once() {
        let mut b = Bullet::new(Vec2::ZERO, 0.0);
        assert!(!b.travel(5000.0));
        assert!(b.time_to_live() <= 0.0);
    }
}
