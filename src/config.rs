//! Motion Configuration
//!
//! Speeds and default key bindings, loadable from JSON. Every field has a
//! default, so a config file only needs the values it changes:
//!
//! ```json
//! {
//!   "speeds": { "frontal": 300.0, "boost": 1.5 },
//!   "bindings": { "move_forward": "Up", "move_backward": "Down" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::controllers::action::Action;
use crate::controllers::movement::MovementController;
use crate::controllers::speed::{FixedSpeed, SpeedSource, TunableSpeed};
use crate::core::transform::Transformable;
use crate::input::key::Key;
use crate::input::tracker::KeyStateSource;

/// Environment variable naming an optional config file.
pub const CONFIG_ENV: &str = "MOTION_CONFIG";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config is not valid JSON for this schema.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A speed is NaN or infinite.
    #[error("speed `{field}` must be finite, got {value}")]
    InvalidSpeed {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },
}

// =============================================================================
// SPEEDS
// =============================================================================

/// Speed section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Forward speed (units/second)
    pub frontal: f32,
    /// Backward speed (units/second)
    pub backward: f32,
    /// Strafe speed (units/second)
    pub lateral: f32,
    /// Rotation speed (degrees/second)
    pub rotational: f32,
    /// Multiplier applied to every speed
    pub boost: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        let base = FixedSpeed::DEFAULT;
        Self {
            frontal: base.frontal,
            backward: base.backward,
            lateral: base.lateral,
            rotational: base.rotational,
            boost: 1.0,
        }
    }
}

impl SpeedConfig {
    /// Reject non-finite values and clamp negative ones to zero.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("frontal", &mut self.frontal),
            ("backward", &mut self.backward),
            ("lateral", &mut self.lateral),
            ("rotational", &mut self.rotational),
            ("boost", &mut self.boost),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidSpeed { field, value: *value });
            }
            if *value < 0.0 {
                warn!(field, value = *value, "negative speed clamped to 0");
                *value = 0.0;
            }
        }
        Ok(self)
    }

    /// Base speeds, without boost.
    pub fn base(&self) -> FixedSpeed {
        FixedSpeed::new(self.frontal, self.backward, self.lateral, self.rotational)
    }

    /// Runtime-tunable speed source seeded from this config.
    pub fn to_speed(&self) -> TunableSpeed {
        TunableSpeed::new(self.base()).with_boost(self.boost)
    }
}

// =============================================================================
// MOTION CONFIG
// =============================================================================

/// Full motion config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Speeds
    pub speeds: SpeedConfig,
    /// Action name → key
    pub bindings: BTreeMap<String, Key>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        let bindings = [
            (Action::MoveForward, Key::W),
            (Action::MoveBackward, Key::S),
            (Action::MoveLeft, Key::A),
            (Action::MoveRight, Key::D),
            (Action::RotateRight, Key::E),
            (Action::RotateLeft, Key::Q),
        ]
        .into_iter()
        .map(|(action, key)| (action.name().to_string(), key))
        .collect();

        Self {
            speeds: SpeedConfig::default(),
            bindings,
        }
    }
}

impl MotionConfig {
    /// Parse and validate JSON.
    ///
    /// A `bindings` object replaces the default bindings entirely.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: MotionConfig = serde_json::from_str(json)?;
        config.speeds = config.speeds.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded motion config");
        Ok(config)
    }

    /// Load from `path` if given, otherwise defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from the file named by [`CONFIG_ENV`], or defaults if unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(std::path::PathBuf::from);
        Self::load_optional(path.as_deref())
    }

    /// Pretty JSON, suitable for writing a starter config.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Bindings with known action names, in action order.
    ///
    /// Unknown names are skipped with a warning.
    pub fn resolved_bindings(&self) -> Vec<(Action, Key)> {
        let mut resolved: Vec<(Action, Key)> = self
            .bindings
            .iter()
            .filter_map(|(name, key)| match Action::from_name(name) {
                Some(action) => Some((action, *key)),
                None => {
                    warn!(action = %name, "ignoring binding for unknown action");
                    None
                }
            })
            .collect();
        resolved.sort();
        resolved
    }

    /// Bind every configured action on `controller`. Returns how many were
    /// bound.
    pub fn apply_bindings<I, S, T>(&self, controller: &mut MovementController<'_, I, S, T, Key>) -> usize
    where
        I: KeyStateSource<Key>,
        S: SpeedSource,
        T: Transformable,
    {
        let resolved = self.resolved_bindings();
        for (action, key) in &resolved {
            controller.map_action(*action, *key);
        }
        resolved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::Transform;
    use crate::input::keyboard::HeldKeys;
    use crate::input::tracker::KeyTracker;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.speeds.frontal, 500.0);
        assert_eq!(config.speeds.lateral, 150.0);
        assert_eq!(config.speeds.rotational, 250.0);
        assert_eq!(config.speeds.boost, 1.0);
        assert_eq!(config.bindings.len(), 6);
        assert_eq!(config.bindings["rotate_left"], Key::Q);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MotionConfig::from_json_str(r#"{ "speeds": { "frontal": 300.0, "boost": 1.5 } }"#).unwrap();
        assert_eq!(config.speeds.frontal, 300.0);
        assert_eq!(config.speeds.backward, 500.0);
        assert_eq!(config.speeds.boost, 1.5);
        assert_eq!(config.bindings, MotionConfig::default().bindings);
    }

    #[test]
    fn test_bindings_replace_defaults() {
        let config = MotionConfig::from_json_str(r#"{ "bindings": { "move_forward": "Up" } }"#).unwrap();
        assert_eq!(config.resolved_bindings(), vec![(Action::MoveForward, Key::Up)]);
    }

    #[test]
    fn test_unknown_action_is_skipped() {
        let config = MotionConfig::from_json_str(r#"{ "bindings": { "jump": "Space", "move_left": "Left" } }"#).unwrap();
        assert_eq!(config.resolved_bindings(), vec![(Action::MoveLeft, Key::Left)]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = MotionConfig::from_json_str(r#"{ "bindings": { "move_left": "Mouse1" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_negative_speed_is_clamped() {
        let config = MotionConfig::from_json_str(r#"{ "speeds": { "lateral": -5.0 } }"#).unwrap();
        assert_eq!(config.speeds.lateral, 0.0);
    }

    #[test]
    fn test_non_finite_speed_is_rejected() {
        let speeds = SpeedConfig {
            rotational: f32::INFINITY,
            ..SpeedConfig::default()
        };
        let err = speeds.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed { field: "rotational", .. }));
        assert_eq!(err.to_string(), "speed `rotational` must be finite, got inf");
    }

    #[test]
    fn test_to_speed_applies_boost() {
        let speeds = SpeedConfig {
            boost: 2.0,
            ..SpeedConfig::default()
        };
        let speed = speeds.to_speed();
        assert_eq!(speed.frontal_movement(), 1000.0);
        assert_eq!(speed.base(), FixedSpeed::DEFAULT);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = MotionConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(MotionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("motion-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{ "speeds": { "boost": 3.0 } }"#).unwrap();

        let config = MotionConfig::load_optional(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.speeds.boost, 3.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(matches!(MotionConfig::load(&path), Err(ConfigError::Io(_))));
        assert_eq!(MotionConfig::load_optional(None).unwrap(), MotionConfig::default());
    }

    #[test]
    fn test_apply_bindings() {
        let mut transform = Transform::new();
        let tracker: KeyTracker<HeldKeys> = KeyTracker::new(HeldKeys::new());
        let mut controller = MovementController::new(tracker, FixedSpeed::DEFAULT);
        controller.attach(&mut transform);

        let bound = MotionConfig::default().apply_bindings(&mut controller);
        assert_eq!(bound, 6);
        assert_eq!(controller.bindings().key_for(Action::RotateRight), Some(Key::E));
        assert_eq!(controller.input().len(), 6);
    }
}
