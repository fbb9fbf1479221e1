//! Vector outlines for the game entities

use glam::Vec2;

use super::vertex::colors;
use super::{Drawable, ShapeBatch};
use crate::consts::FRAME_MS;
use crate::{rotate_around_origin, rotate_around_pivot};
use crate::sim::{Bullet, Rock, Ship};

/// Stroke width in screen pixels
const LINE_WIDTH: f32 = 2.0;
/// Bullets are small filled squares
const BULLET_SIZE: f32 = 4.0;
/// Wreck fragments spin this much per frame (radians)
const WRECK_SPIN_PER_FRAME: f32 = 0.02;
/// Wreck fades this much per frame
const WRECK_FADE_PER_FRAME: f32 = 0.005;

/// Rock outline at full scale, relative to its center
const ROCK_OUTLINE: [Vec2; 12] = [
    Vec2::new(4.0, 36.0),
    Vec2::new(34.0, 26.0),
    Vec2::new(33.0, 8.0),
    Vec2::new(40.0, -10.0),
    Vec2::new(30.0, -24.0),
    Vec2::new(12.0, -28.0),
    Vec2::new(6.0, -36.0),
    Vec2::new(-12.0, -30.0),
    Vec2::new(-16.0, -28.0),
    Vec2::new(-28.0, -8.0),
    Vec2::new(-30.0, 8.0),
    Vec2::new(-14.0, 28.0),
];

impl Drawable for Ship {
    /// An "A" shape: a short bar and two legs. Once destroyed, the bar and
    /// legs drift apart, spin and fade out.
    fn draw(&self, batch: &mut ShapeBatch) {
        let frames = self.destroyed_for().map(|ms| ms / FRAME_MS);
        let (wreck_spin, alpha, drift) = match frames {
            Some(f) => (
                (f * WRECK_SPIN_PER_FRAME) % std::f32::consts::TAU,
                1.0 - f * WRECK_FADE_PER_FRAME,
                f,
            ),
            None => (0.0, 1.0, 0.0),
        };
        if alpha <= 0.0 {
            return;
        }
        let color = colors::with_alpha(colors::SHIP, alpha);

        // Each part spins about its own offset (in ship space), then the
        // whole ship turns about its position
        let part = |offset: Vec2, a: Vec2, b: Vec2, batch: &mut ShapeBatch| {
            let to_world = |p: Vec2| {
                let local = rotate_around_pivot(offset, offset + p, wreck_spin);
                rotate_around_pivot(self.position, self.position + local, self.spin)
            };
            batch.line(to_world(a), to_world(b), LINE_WIDTH, color);
        };

        part(Vec2::ZERO, Vec2::new(-4.0, 0.0), Vec2::new(4.0, 0.0), batch);
        part(
            Vec2::new(-drift, 0.0),
            Vec2::new(0.0, -10.0),
            Vec2::new(-8.0, 10.0),
            batch,
        );
        part(
            Vec2::new(drift, 0.0),
            Vec2::new(0.0, -10.0),
            Vec2::new(8.0, 10.0),
            batch,
        );
    }
}

impl Drawable for Bullet {
    fn draw(&self, batch: &mut ShapeBatch) {
        batch.filled_rect(
            self.position.x,
            self.position.y,
            BULLET_SIZE,
            BULLET_SIZE,
            colors::BULLET,
        );
    }
}

impl Drawable for Rock {
    fn draw(&self, batch: &mut ShapeBatch) {
        let scale = self.scale();
        let points: Vec<Vec2> = ROCK_OUTLINE
            .iter()
            .map(|&p| rotate_around_origin(p * scale, self.spin()) + self.position)
            .collect();
        batch.outline(&points, LINE_WIDTH, colors::ROCK);
    }
}
