//! Keyboard input capability
//!
//! The simulation only asks "is this key held right now"; the host feeds
//! key-down/key-up events into a [`Keyboard`].

/// Logical game inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::RotateLeft, Key::RotateRight, Key::Thrust, Key::Fire];

    /// Map a DOM `KeyboardEvent.key` value to a game input
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::RotateLeft),
            "ArrowRight" => Some(Key::RotateRight),
            "ArrowUp" => Some(Key::Thrust),
            " " => Some(Key::Fire),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Key::RotateLeft => 0,
            Key::RotateRight => 1,
            Key::Thrust => 2,
            Key::Fire => 3,
        }
    }
}

/// Read-only view of which inputs are held
pub trait KeyState {
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Held-key tracker fed by the host's key events
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    pressed: [bool; 4],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is a game input (the host should swallow the event)
    pub fn record_key_down(&mut self, dom_key: &str) -> bool {
        self.record(dom_key, true)
    }

    /// Returns true if the key is a game input (the host should swallow the event)
    pub fn record_key_up(&mut self, dom_key: &str) -> bool {
        self.record(dom_key, false)
    }

    /// Release everything (e.g. when the window loses focus and key-up never arrives)
    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }

    fn record(&mut self, dom_key: &str, down: bool) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.pressed[key.slot()] = down;
                true
            }
            None => false,
        }
    }
}

impl KeyState for Keyboard {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed[key.slot()]
    }
}
