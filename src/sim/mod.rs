//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the GPU or a clock:
//! - Time arrives as an explicit delta in milliseconds
//! - Randomness comes from the seeded RNG in [`GameState`]
//! - Input and audio are reached through the [`KeyState`] and
//!   [`SoundBoard`](crate::audio::SoundBoard) traits

pub mod bullet;
pub mod collision;
pub mod input;
pub mod rock;
pub mod ship;
pub mod state;
pub mod tick;

pub use bullet::Bullet;
pub use collision::{
    Circle, Rect, Triangle, circles_overlap, point_in_circle, rect_contains_point, rects_overlap,
    triangle_collides_circle,
};
pub use input::{Key, KeyState, Keyboard};
pub use rock::Rock;
pub use ship::Ship;
pub use state::{GamePhase, GameState};
pub use tick::tick;
