//! Drifting rocks
//!
//! A rock decays through stages 2 → 1 → 0; each hit splits it into two
//! smaller fragments until a stage-0 rock is destroyed outright.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::collision::Circle;
use crate::consts::*;
use crate::{Arena, heading, reduce_zero_two_pi, to_radians, wrap_axis};

#[derive(Debug, Clone)]
pub struct Rock {
    /// Center of the rock
    pub position: Vec2,
    /// Direction of travel (radians, 0 = up), never near-axis-aligned
    angle: f32,
    /// Visual rotation (radians)
    spin: f32,
    spin_index: usize,
    speed_index: usize,
    stage: u8,
    arena: Arena,
}

impl Rock {
    /// Factor indices and stage are clamped to their table ranges.
    pub fn new(
        arena: Arena,
        position: Vec2,
        angle: f32,
        spin_index: usize,
        speed_index: usize,
        stage: u8,
    ) -> Self {
        if spin_index >= ROCK_SPINS.len() || speed_index >= ROCK_SPEEDS.len() {
            log::debug!(
                "Rock factor index out of range (spin {}, speed {}), clamping",
                spin_index,
                speed_index
            );
        }
        let mut rock = Self {
            position,
            angle: 0.0,
            spin: 0.0,
            spin_index: spin_index.min(ROCK_SPINS.len() - 1),
            speed_index: speed_index.min(ROCK_SPEEDS.len() - 1),
            stage: stage.min(ROCK_MAX_STAGE),
            arena,
        };
        rock.set_angle(angle);
        rock
    }

    /// A full-size rock entering from just outside a random screen edge
    pub fn build_random<R: Rng>(rng: &mut R, arena: Arena) -> Self {
        let spin_index = rng.random_range(0..2);
        let speed_index = rng.random_range(0..2);
        let x = rng.random::<f32>() * arena.width;
        let y = rng.random::<f32>() * arena.height;
        let angle = rng.random::<f32>() * TAU;

        let position = match rng.random_range(0..4) {
            0 => Vec2::new(x, -ROCK_SPAWN_OFFSET),
            1 => Vec2::new(-ROCK_SPAWN_OFFSET, y),
            2 => Vec2::new(x, arena.height + ROCK_SPAWN_OFFSET),
            _ => Vec2::new(arena.width + ROCK_SPAWN_OFFSET, y),
        };

        Self::new(arena, position, angle, spin_index, speed_index, ROCK_MAX_STAGE)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Set the direction of travel, pushed out of the bands around the axes
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = clamp_heading(angle);
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn spin_index(&self) -> usize {
        self.spin_index
    }

    pub fn speed_index(&self) -> usize {
        self.speed_index
    }

    pub fn scale(&self) -> f32 {
        ROCK_SCALES[self.stage as usize]
    }

    /// Split into two smaller rocks, or `None` when a stage-0 rock is destroyed.
    ///
    /// Each fragment independently keeps the parent's spin and speed slots
    /// or moves one slot up the table. The caller removes the parent.
    pub fn explode<R: Rng>(&self, rng: &mut R) -> Option<[Rock; 2]> {
        if self.stage == 0 {
            return None;
        }

        let spread = to_radians(ROCK_SPREAD_DEG);
        let stage = self.stage - 1;
        let mut fragment = |angle: f32| {
            let spin_index = self.spin_index + usize::from(rng.random_bool(0.5));
            let speed_index = self.speed_index + usize::from(rng.random_bool(0.5));
            Rock::new(self.arena, self.position, angle, spin_index, speed_index, stage)
        };

        let left = fragment(self.angle - spread);
        let right = fragment(self.angle + spread);
        Some([left, right])
    }

    /// Travel along the heading, wrap around the screen, and spin
    pub fn animate(&mut self, delta: f32) {
        let displacement = delta * ROCK_TRAVEL_FACTOR * ROCK_SPEEDS[self.speed_index];
        let p = self.position + heading(self.angle) * displacement;
        self.position = Vec2::new(
            wrap_axis(p.x, self.arena.width, ROCK_WRAP_MARGIN),
            wrap_axis(p.y, self.arena.height, ROCK_WRAP_MARGIN),
        );

        self.spin =
            reduce_zero_two_pi(self.spin + delta * ROCK_SPIN_FACTOR * ROCK_SPINS[self.spin_index]);
    }

    pub fn as_circle(&self) -> Circle {
        Circle::new(self.position, ROCK_RADIUS * self.scale())
    }
}

/// Keep rocks off exact horizontals and verticals.
///
/// A rock moving along an axis can sit in the off-screen margin forever.
/// Angles within 20° before a cardinal direction snap to the band's lower
/// edge, angles within 20° after it to the upper edge.
pub fn clamp_heading(angle: f32) -> f32 {
    let a = reduce_zero_two_pi(angle);
    let band = ROCK_CLAMP_DEG;
    let deg = to_radians;

    if a < deg(band) {
        deg(band)
    } else if a > deg(360.0 - band) {
        deg(360.0 - band)
    } else if a >= deg(90.0 - band) && a < deg(90.0) {
        deg(90.0 - band)
    } else if a > deg(90.0) && a < deg(90.0 + band) {
        deg(90.0 + band)
    } else if a >= deg(180.0 - band) && a < deg(180.0) {
        deg(180.0 - band)
    } else if a > deg(180.0) && a < deg(180.0 + band) {
        deg(180.0 + band)
    } else if a >= deg(270.0 - band) && a < deg(270.0) {
        deg(270.0 - band)
    } else if a > deg(270.0) && a < deg(270.0 + band) {
        deg(270.0 + band)
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock_at(position: Vec2, angle_deg: f32, stage: u8) -> Rock {
        Rock::new(Arena::default(), position, to_radians(angle_deg), 0, 0, stage)
    }

    #[test]
    fn test_clamp_snaps_to_band_edges() {
        let cases = [
            (0.0, 20.0),
            (10.0, 20.0),
            (350.0, 340.0),
            (80.0, 70.0),
            (100.0, 110.0),
            (170.0, 160.0),
            (190.0, 200.0),
            (260.0, 250.0),
            (280.0, 290.0),
            (45.0, 45.0),
            (-10.0, 340.0),
        ];
        for (input, expected) in cases {
            let out = clamp_heading(to_radians(input));
            assert!(
                (out - to_radians(expected)).abs() < 1e-4,
                "{} -> {} (expected {})",
                input,
                out.to_degrees(),
                expected
            );
        }
    }

    #[test]
    fn test_clamp_leaves_exact_cardinals_except_up() {
        for d in [90.0f32, 180.0, 270.0] {
            assert_eq!(clamp_heading(to_radians(d)), to_radians(d));
        }
    }

    #[test]
    fn test_stage_two_explodes_into_two_stage_one() {
        let mut rng = Pcg32::seed_from_u64(7);
        let rock = rock_at(Vec2::new(200.0, 200.0), 135.0, 2);
        let [a, b] = rock.explode(&mut rng).expect("stage 2 splits");

        for child in [&a, &b] {
            assert_eq!(child.stage(), 1);
            assert_eq!(child.position, rock.position);
        }
        assert!((a.angle() - to_radians(110.0)).abs() < 1e-4);
        assert!((b.angle() - to_radians(160.0)).abs() < 1e-4);
    }

    #[test]
    fn test_stage_zero_is_destroyed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let rock = rock_at(Vec2::new(200.0, 200.0), 45.0, 0);
        assert!(rock.explode(&mut rng).is_none());
    }

    #[test]
    fn test_recursive_explosion_bottoms_out() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut pending = vec![rock_at(Vec2::new(300.0, 300.0), 45.0, 2)];
        let mut produced = 0;
        let mut destroyed = 0;

        while let Some(rock) = pending.pop() {
            match rock.explode(&mut rng) {
                Some(children) => {
                    for child in children {
                        assert_eq!(child.stage(), rock.stage() - 1);
                        produced += 1;
                        pending.push(child);
                    }
                }
                None => {
                    assert_eq!(rock.stage(), 0);
                    destroyed += 1;
                }
            }
        }

        assert_eq!(produced, 6);
        assert_eq!(destroyed, 4);
    }

    #[test]
    fn test_fragment_indices_inherit_or_advance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let parent = Rock::new(Arena::default(), Vec2::ZERO, 1.0, 1, 2, 2);
        let mut seen_advanced = false;
        let mut seen_inherited = false;

        for _ in 0..64 {
            for child in parent.explode(&mut rng).expect("splits") {
                assert!(child.spin_index() == 1 || child.spin_index() == 2);
                assert!(child.speed_index() == 2 || child.speed_index() == 3);
                seen_advanced |= child.speed_index() == 3;
                seen_inherited |= child.speed_index() == 2;
            }
        }
        assert!(seen_advanced && seen_inherited);
    }

    #[test]
    fn test_indices_clamped_at_table_end() {
        let mut rng = Pcg32::seed_from_u64(11);
        let parent = Rock::new(Arena::default(), Vec2::ZERO, 1.0, 3, 3, 1);
        for child in parent.explode(&mut rng).expect("splits") {
            assert_eq!(child.spin_index(), 3);
            assert_eq!(child.speed_index(), 3);
        }
        let wild = Rock::new(Arena::default(), Vec2::ZERO, 1.0, 99, 99, 9);
        assert_eq!(wild.spin_index(), ROCK_SPINS.len() - 1);
        assert_eq!(wild.stage(), ROCK_MAX_STAGE);
    }

    #[test]
    fn test_circle_radius_by_stage() {
        let p = Vec2::new(100.0, 100.0);
        assert_eq!(rock_at(p, 45.0, 2).as_circle().radius, 36.0);
        assert_eq!(rock_at(p, 45.0, 1).as_circle().radius, 18.0);
        assert_eq!(rock_at(p, 45.0, 0).as_circle().radius, 9.0);
    }

    #[test]
    fn test_animate_moves_along_heading() {
        let mut rock = rock_at(Vec2::new(400.0, 300.0), 135.0, 2);
        rock.animate(80.0);
        // 80ms at 1/8 px per ms = 10px, heading down-right
        let expected = Vec2::new(400.0, 300.0) + heading(to_radians(135.0)) * 10.0;
        assert!((rock.position - expected).length() < 1e-3);
        assert!(rock.spin() > 0.0);
    }

    #[test]
    fn test_animate_wraps_right_edge() {
        let mut rock = rock_at(Vec2::new(800.0 + ROCK_WRAP_MARGIN, 300.0), 135.0, 2);
        rock.animate(16.0);
        assert_eq!(rock.position.x, -ROCK_WRAP_MARGIN);
    }

    #[test]
    fn test_animate_wraps_bottom_edge() {
        let mut rock = rock_at(Vec2::new(400.0, 600.0 + ROCK_WRAP_MARGIN), 135.0, 2);
        rock.animate(16.0);
        assert_eq!(rock.position.y, -ROCK_WRAP_MARGIN);
    }

    #[test]
    fn test_build_random_spawns_off_screen() {
        let mut rng = Pcg32::seed_from_u64(99);
        let arena = Arena::default();
        for _ in 0..100 {
            let rock = Rock::build_random(&mut rng, arena);
            let p = rock.position;
            assert_eq!(rock.stage(), ROCK_MAX_STAGE);
            assert!(rock.spin_index() < 2 && rock.speed_index() < 2);
            let off_screen = p.x < 0.0 || p.y < 0.0 || p.x > arena.width || p.y > arena.height;
            assert!(off_screen, "{:?} is on screen", p);
        }
    }

    proptest! {
        #[test]
        fn clamped_heading_avoids_forbidden_bands(angle in -100.0f32..100.0) {
            let out = clamp_heading(angle);
            let deg = to_radians;
            let bands = [
                (0.0, 20.0), (340.0, 360.0),
                (70.0, 90.0), (90.0, 110.0),
                (160.0, 180.0), (180.0, 200.0),
                (250.0, 270.0), (270.0, 290.0),
            ];
            prop_assert!(out != 0.0);
            for (lo, hi) in bands {
                prop_assert!(!(out > deg(lo) && out < deg(hi)), "{} in ({}, {})", out.to_degrees(), lo, hi);
            }
        }

        #[test]
        fn spin_stays_normalized(delta in 0.0f32..10_000.0, spin_index in 0usize..4) {
            let mut rock = Rock::new(Arena::default(), Vec2::new(400.0, 300.0), 1.0, spin_index, 0, 2);
            rock.animate(delta);
            prop_assert!(rock.spin() >= 0.0 && rock.spin() <= TAU);
        }
    }
}
