//! The player's ship

use glam::Vec2;

use super::collision::{Circle, Triangle};
use crate::consts::*;
use crate::{
    Arena, distance_from_origin, frame_scale, heading, reduce_zero_two_pi, rotate_around_origin,
    wrap_axis,
};

#[derive(Debug, Clone)]
pub struct Ship {
    /// Center of the ship, at the middle of the A's horizontal bar
    pub position: Vec2,
    /// Heading in radians, 0 = up
    pub spin: f32,
    /// Velocity in pixels per frame
    pub speed: Vec2,
    /// Milliseconds since the ship was destroyed, `None` while intact
    destroyed_for: Option<f32>,
    arena: Arena,
}

impl Ship {
    pub fn new(arena: Arena) -> Self {
        let mut ship = Self {
            position: Vec2::ZERO,
            spin: 0.0,
            speed: Vec2::ZERO,
            destroyed_for: None,
            arena,
        };
        ship.reset();
        ship
    }

    /// Re-center with no motion. Destroyed state is left alone.
    pub fn reset(&mut self) {
        self.position = self.arena.center();
        self.speed = Vec2::ZERO;
        self.spin = 0.0;
    }

    pub fn rotate_left(&mut self, delta: f32) {
        self.spin = reduce_zero_two_pi(self.spin - SHIP_ROTATION_RATE * frame_scale(delta));
    }

    pub fn rotate_right(&mut self, delta: f32) {
        self.spin = reduce_zero_two_pi(self.spin + SHIP_ROTATION_RATE * frame_scale(delta));
    }

    /// Apply thrust along the current heading.
    ///
    /// A ship at rest gets a stronger kick so the first push clears the
    /// snap-to-zero threshold. A push that would exceed the speed cap is
    /// dropped entirely, leaving the previous speed.
    pub fn accelerate(&mut self, delta: f32) {
        let scale = frame_scale(delta);
        let factor = if self.speed == Vec2::ZERO {
            SHIP_THRUST_KICK
        } else {
            SHIP_THRUST
        };

        let mut new_speed = self.speed + heading(self.spin) * factor * scale;

        let min = SHIP_MIN_SPEED * scale;
        if new_speed.x.abs() < min && new_speed.y.abs() < min {
            new_speed = Vec2::ZERO;
        }

        if distance_from_origin(new_speed) <= SHIP_MAX_SPEED {
            self.speed = new_speed;
        }
    }

    /// Integrate position, wrap around the screen, and age the wreck if destroyed
    pub fn travel(&mut self, delta: f32) {
        let p = self.position + self.speed * frame_scale(delta);
        self.position = Vec2::new(
            wrap_axis(p.x, self.arena.width, SHIP_WRAP_MARGIN),
            wrap_axis(p.y, self.arena.height, SHIP_WRAP_MARGIN),
        );

        if let Some(elapsed) = self.destroyed_for.as_mut() {
            *elapsed += delta;
        }
    }

    /// Where bullets leave the ship
    pub fn firing_head_position(&self) -> Vec2 {
        self.local_to_world(SHIP_NOSE)
    }

    /// Coarse-grained bound for collision detection
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.position, SHIP_RADIUS)
    }

    /// Fine-grained bound for collision detection
    pub fn as_triangle(&self) -> Triangle {
        Triangle::new(
            self.local_to_world(SHIP_NOSE),
            self.local_to_world(SHIP_LEFT_FOOT),
            self.local_to_world(SHIP_RIGHT_FOOT),
        )
    }

    pub fn set_destroyed(&mut self, destroyed: bool) {
        self.destroyed_for = if destroyed { Some(0.0) } else { None };
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed_for.is_some()
    }

    pub fn destroyed_for(&self) -> Option<f32> {
        self.destroyed_for
    }

    #[inline]
    fn local_to_world(&self, local: Vec2) -> Vec2 {
        rotate_around_origin(local, self.spin) + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn ship() -> Ship {
        Ship::new(Arena::default())
    }

    #[test]
    fn test_new_ship_is_centered_and_intact() {
        let s = ship();
        assert_eq!(s.position, Vec2::new(400.0, 300.0));
        assert_eq!(s.speed, Vec2::ZERO);
        assert_eq!(s.spin, 0.0);
        assert!(!s.is_destroyed());
    }

    #[test]
    fn test_rotate_left_wraps_below_zero() {
        let mut s = ship();
        s.rotate_left(FRAME_MS);
        assert!((s.spin - (TAU - SHIP_ROTATION_RATE)).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_right_wraps_past_full_turn() {
        let mut s = ship();
        s.spin = TAU - 0.01;
        s.rotate_right(FRAME_MS);
        assert!(s.spin >= 0.0 && s.spin < TAU);
        assert!((s.spin - (SHIP_ROTATION_RATE - 0.01)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_scales_with_elapsed_time() {
        let mut s = ship();
        s.rotate_right(FRAME_MS * 2.0);
        assert!((s.spin - SHIP_ROTATION_RATE * 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_first_thrust_gets_kick() {
        let mut s = ship();
        s.accelerate(FRAME_MS);
        assert!(s.speed.x.abs() < 1e-6);
        assert!((s.speed.y + SHIP_THRUST_KICK).abs() < 1e-6);

        s.accelerate(FRAME_MS);
        assert!((s.speed.y + SHIP_THRUST_KICK + SHIP_THRUST).abs() < 1e-6);
    }

    #[test]
    fn test_kick_escapes_snap_at_high_refresh_rate() {
        let mut s = ship();
        s.spin = 0.3;
        s.accelerate(1000.0 / 240.0);
        assert_ne!(s.speed, Vec2::ZERO);
    }

    #[test]
    fn test_slow_speed_snaps_to_zero() {
        let mut s = ship();
        // Drifting down, thrusting up
        s.speed = Vec2::new(0.0, 0.12);
        s.accelerate(FRAME_MS);
        assert_eq!(s.speed, Vec2::ZERO);
    }

    #[test]
    fn test_thrust_over_cap_is_rejected() {
        let mut s = ship();
        s.speed = Vec2::new(0.0, -4.95);
        s.accelerate(FRAME_MS);
        assert_eq!(s.speed, Vec2::new(0.0, -4.95));

        // Thrusting the other way is still allowed
        s.spin = std::f32::consts::PI;
        s.accelerate(FRAME_MS);
        assert!(s.speed.y > -4.95);
    }

    #[test]
    fn test_travel_wraps_right_edge() {
        let mut s = ship();
        s.position = Vec2::new(800.0 + SHIP_WRAP_MARGIN, 300.0);
        s.speed = Vec2::new(1.0, 0.0);
        s.travel(FRAME_MS);
        assert_eq!(s.position, Vec2::new(-SHIP_WRAP_MARGIN, 300.0));
    }

    #[test]
    fn test_travel_wraps_top_edge() {
        let mut s = ship();
        s.position = Vec2::new(200.0, -SHIP_WRAP_MARGIN);
        s.speed = Vec2::new(0.0, -2.0);
        s.travel(FRAME_MS);
        assert_eq!(s.position, Vec2::new(200.0, 600.0 + SHIP_WRAP_MARGIN));
    }

    #[test]
    fn test_destroyed_timer_counts_while_destroyed() {
        let mut s = ship();
        s.travel(100.0);
        assert_eq!(s.destroyed_for(), None);

        s.set_destroyed(true);
        s.travel(100.0);
        s.travel(50.0);
        assert_eq!(s.destroyed_for(), Some(150.0));

        s.set_destroyed(false);
        assert!(!s.is_destroyed());
    }

    #[test]
    fn test_reset_keeps_destroyed_state() {
        let mut s = ship();
        s.set_destroyed(true);
        s.position = Vec2::new(10.0, 10.0);
        s.speed = Vec2::new(1.0, 1.0);
        s.spin = 1.0;
        s.reset();
        assert_eq!(s.position, Vec2::new(400.0, 300.0));
        assert_eq!(s.speed, Vec2::ZERO);
        assert_eq!(s.spin, 0.0);
        assert!(s.is_destroyed());
    }

    #[test]
    fn test_triangle_follows_spin() {
        let mut s = ship();
        s.spin = FRAC_PI_2;
        let t = s.as_triangle();
        // Nose points right
        assert!((t.p1 - Vec2::new(410.0, 300.0)).length() < 1e-3);
        assert_eq!(t.p1, s.firing_head_position());
    }

    proptest! {
        #[test]
        fn thrust_never_exceeds_cap(
            steps in proptest::collection::vec((0.0f32..std::f32::consts::TAU, 1.0f32..50.0), 1..300)
        ) {
            let mut s = ship();
            for (spin, delta) in steps {
                s.spin = spin;
                s.accelerate(delta);
                prop_assert!(distance_from_origin(s.speed) <= SHIP_MAX_SPEED);
            }
        }

        #[test]
        fn saturated_thrust_leaves_speed_unchanged(spin in 0.0f32..std::f32::consts::TAU) {
            let mut s = ship();
            s.spin = spin;
            s.speed = heading(spin) * SHIP_MAX_SPEED;
            let before = s.speed;
            s.accelerate(FRAME_MS);
            prop_assert_eq!(s.speed, before);
        }
    }
}
