//! WebGPU rendering module
//!
//! Entities draw themselves into a [`ShapeBatch`] in screen pixels; the
//! [`RenderState`] uploads the batch and draws it as one triangle list.

pub mod pipeline;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::{GamePhase, GameState, Ship};
use vertex::colors;

/// Something that can put itself on screen. Drawing never changes the
/// simulation.
pub trait Drawable {
    fn draw(&self, batch: &mut ShapeBatch);
}

/// One frame's worth of geometry for a surface of known size
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    width: f32,
    height: f32,
}

impl ShapeBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        self.vertices
            .extend_from_slice(&shapes::line(a, b, width, color));
    }

    pub fn outline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        self.vertices
            .extend(shapes::outline(points, width, color));
    }

    pub fn filled_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.vertices
            .extend_from_slice(&shapes::filled_rect(x, y, w, h, color));
    }
}

/// Spacing and baseline of the remaining-ship icons
const LIVES_SPACING: f32 = 30.0;
const LIVES_INSET: f32 = 10.0;
const LIVES_BASELINE_FROM_BOTTOM: f32 = 25.0;

/// Build the whole frame: remaining ships, then the ship (hidden on the
/// intro screen), bullets and rocks.
pub fn draw_scene(state: &GameState, batch: &mut ShapeBatch) {
    batch.clear();

    let mut icon = Ship::new(state.arena);
    let y = batch.height() - LIVES_BASELINE_FROM_BOTTOM;
    for i in 1..=state.lives {
        icon.position = Vec2::new(f32::from(i) * LIVES_SPACING - LIVES_INSET, y);
        icon.draw(batch);
    }
    for v in batch.vertices.iter_mut() {
        v.color = colors::HUD;
    }

    if state.phase != GamePhase::Intro {
        state.ship.draw(batch);
    }
    for bullet in &state.bullets {
        bullet.draw(batch);
    }
    for rock in &state.rocks {
        rock.draw(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bullet;
    use crate::{Arena, Tuning};

    #[test]
    fn test_intro_hides_ship() {
        let state = GameState::new(Arena::default(), Tuning::default(), 1);
        let mut batch = ShapeBatch::new(800.0, 600.0);
        draw_scene(&state, &mut batch);

        // Only the three remaining-ship icons
        assert_eq!(batch.vertices().len(), 3 * 3 * 6);
        assert!(batch.vertices().iter().all(|v| v.position[1] > 500.0));
    }

    #[test]
    fn test_scene_includes_entities() {
        let mut state = GameState::new(Arena::default(), Tuning::default(), 1);
        state.start();
        state.lives = 0;
        state.bullets.push(Bullet::new(Vec2::new(50.0, 50.0), 0.0));

        let mut batch = ShapeBatch::new(800.0, 600.0);
        draw_scene(&state, &mut batch);
        assert_eq!(batch.vertices().len(), 3 * 6 + 6);

        // Redrawing starts from scratch
        draw_scene(&state, &mut batch);
        assert_eq!(batch.vertices().len(), 3 * 6 + 6);
    }
}
