//! Game state and phase
//!
//! Everything the frame loop mutates lives in [`GameState`]. The host owns
//! one, feeds it timestamps, and reads it back for drawing and the HUD.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::input::KeyState;
use super::rock::Rock;
use super::ship::Ship;
use super::tick::tick;
use crate::Arena;
use crate::audio::SoundBoard;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first click
    Intro,
    /// Short pause before a wave of rocks appears
    StartingLevel,
    /// Active gameplay
    Playing,
    /// Ship wreck on screen, waiting to respawn
    Destroyed,
    /// Out of ships; restarts on its own
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub rocks: Vec<Rock>,
    /// Ships left
    pub lives: u8,
    pub score: u32,
    /// Best score this session
    pub hi_score: u32,
    /// Levels started since the page loaded
    pub level: u32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    last_timestamp: Option<f64>,

    // Per-phase accumulators (ms)
    pub(crate) starting_level_wait: f32,
    pub(crate) ship_collision_duration: f32,
    pub(crate) last_bullet_fire_wait: f32,
    pub(crate) game_over_wait: f32,
}

impl GameState {
    pub fn new(arena: Arena, tuning: Tuning, seed: u64) -> Self {
        log::info!("New game (seed {})", seed);
        Self {
            arena,
            ship: Ship::new(arena),
            lives: tuning.lives,
            tuning,
            phase: GamePhase::Intro,
            bullets: Vec::new(),
            rocks: Vec::new(),
            score: 0,
            hi_score: 0,
            level: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            last_timestamp: None,
            starting_level_wait: 0.0,
            ship_collision_duration: 0.0,
            last_bullet_fire_wait: 0.0,
            game_over_wait: 0.0,
        }
    }

    /// Leave the intro screen. Only the first call has an effect; returns
    /// whether this call started the game.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Intro {
            return false;
        }
        log::info!("Start clicked");
        self.phase = GamePhase::StartingLevel;
        true
    }

    /// Advance to the frame at `timestamp` (ms, as given by
    /// `requestAnimationFrame`).
    ///
    /// The first frame has a zero delta. Gaps longer than
    /// `tuning.max_frame_delta_ms` are clamped, and a clock that runs
    /// backwards yields a zero delta.
    pub fn animate(&mut self, timestamp: f64, keys: &impl KeyState, sound: &mut impl SoundBoard) {
        let delta = match self.last_timestamp {
            Some(last) => (timestamp - last) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        // Not `clamp`: a hand-built tuning may carry a negative cap
        let delta = delta.min(self.tuning.max_frame_delta_ms).max(0.0);
        tick(self, keys, sound, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silence;
    use crate::sim::input::Keyboard;

    #[test]
    fn test_new_game_waits_in_intro() {
        let state = GameState::new(Arena::default(), Tuning::default(), 7);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.lives, 3);
        assert!(state.rocks.is_empty());
        assert_eq!(state.ship.position, state.arena.center());
    }

    #[test]
    fn test_start_is_consumed_once() {
        let mut state = GameState::new(Arena::default(), Tuning::default(), 7);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::StartingLevel);
        assert!(!state.start());

        state.phase = GamePhase::GameOver;
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_animate_clamps_long_gaps() {
        let mut state = GameState::new(Arena::default(), Tuning::default(), 7);
        let keys = Keyboard::new();
        let mut sound = Silence::default();
        state.start();

        // First frame only records the clock
        state.animate(50_000.0, &keys, &mut sound);
        assert_eq!(state.starting_level_wait, 0.0);

        state.animate(60_000.0, &keys, &mut sound);
        assert_eq!(state.starting_level_wait, 250.0);
        assert_eq!(state.phase, GamePhase::StartingLevel);
        assert!(state.rocks.is_empty());
    }

    #[test]
    fn test_animate_survives_negative_delta_cap() {
        let tuning = Tuning {
            max_frame_delta_ms: -1.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(Arena::default(), tuning, 7);
        let keys = Keyboard::new();
        let mut sound = Silence::default();
        state.start();

        state.animate(0.0, &keys, &mut sound);
        state.animate(16.0, &keys, &mut sound);
        assert_eq!(state.starting_level_wait, 0.0);
    }

    #[test]
    fn test_animate_ignores_backwards_clock() {
        let mut state = GameState::new(Arena::default(), Tuning::default(), 7);
        let keys = Keyboard::new();
        let mut sound = Silence::default();
        state.start();

        state.animate(1000.0, &keys, &mut sound);
        state.animate(1100.0, &keys, &mut sound);
        state.animate(900.0, &keys, &mut sound);
        assert_eq!(state.starting_level_wait, 100.0);
    }
}
