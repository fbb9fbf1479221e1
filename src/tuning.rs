//! Data-driven pacing
//!
//! Timing gates and counts for the game state machine. Defaults match the
//! arcade feel; a JSON override can be supplied by the host.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ships at the start of a game
    pub lives: u8,
    /// Large rocks spawned per level
    pub rocks_per_level: usize,
    /// Pause before rocks appear (ms)
    pub level_start_wait_ms: f32,
    /// Time the wreck is shown before a respawn attempt (ms)
    pub respawn_wait_ms: f32,
    /// Time on the game over screen (ms)
    pub game_over_wait_ms: f32,
    /// Minimum time between shots (ms)
    pub fire_interval_ms: f32,
    /// Radius around the screen center that must be free of rocks to respawn
    pub safe_zone_radius: f32,
    /// Longer frame gaps (backgrounded tab, debugger) are clamped to this (ms)
    pub max_frame_delta_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: 3,
            rocks_per_level: 8,
            level_start_wait_ms: 3000.0,
            respawn_wait_ms: 4000.0,
            game_over_wait_ms: 8000.0,
            fire_interval_ms: 500.0,
            safe_zone_radius: 50.0,
            max_frame_delta_ms: 250.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep their defaults.
    ///
    /// Durations and the safe-zone radius must be finite and not negative.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), SetupError> {
        let fields = [
            ("level_start_wait_ms", self.level_start_wait_ms),
            ("respawn_wait_ms", self.respawn_wait_ms),
            ("game_over_wait_ms", self.game_over_wait_ms),
            ("fire_interval_ms", self.fire_interval_ms),
            ("safe_zone_radius", self.safe_zone_radius),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
        ];
        match fields
            .into_iter()
            .find(|&(_, value)| !value.is_finite() || value < 0.0)
        {
            Some((field, value)) => Err(SetupError::TuningValue { field, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lives": 5, "fire_interval_ms": 250.0 }"#).unwrap();
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.fire_interval_ms, 250.0);
        assert_eq!(tuning.rocks_per_level, 8);
        assert_eq!(tuning.respawn_wait_ms, 4000.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Tuning::from_json("{ lives: ").unwrap_err();
        assert!(matches!(err, SetupError::Tuning(_)));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let err = Tuning::from_json(r#"{ "max_frame_delta_ms": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SetupError::TuningValue {
                field: "max_frame_delta_ms",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "safe_zone_radius": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SetupError::TuningValue {
                field: "safe_zone_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_durations_are_allowed() {
        let tuning = Tuning::from_json(r#"{ "fire_interval_ms": 0.0 }"#).unwrap();
        assert_eq!(tuning.fire_interval_ms, 0.0);
    }

    #[test]
    fn test_roundtrip_default() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
