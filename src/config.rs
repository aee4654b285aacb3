//! Locomotion tunables and the config provider record.
//!
//! [`LocomotionConfig`] is the immutable set of six tunables every
//! character is simulated with. It is produced by resolving a
//! [`RawLocomotionConfig`] — the externally supplied provider record in
//! which every field is optional. A missing field is a fatal
//! configuration error: the character subsystem must not start with
//! silently defaulted values.

use std::fmt;

use bevy::log::error;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable locomotion tunables, loaded once per character.
///
/// Modules copy the fields they need during
/// [`load_config`](crate::module::MovementModule::load_config); changing a
/// config after a controller is built has no effect on that controller.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Horizontal movement speed (units/second). Applied as a direct
    /// velocity assignment, not an acceleration ramp.
    pub move_speed: f32,

    /// Instantaneous upward velocity change applied when an ascent starts.
    pub jump_impulse: f32,

    /// Upward acceleration (units/second^2) applied while the jump button
    /// is held during an ascent.
    pub jump_hold_acceleration: f32,

    /// Downward acceleration (units/second^2) applied on every tick the
    /// character is not in a held ascent. The jump module owns gravity.
    pub fall_acceleration: f32,

    /// Grace window (seconds) after leaving ground during which a jump
    /// press is still honored as a ground jump.
    pub coyote_window_seconds: f32,

    /// Maximum duration (seconds) of hold-accelerated ascent.
    pub max_jump_hold_seconds: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_impulse: 9.8,
            jump_hold_acceleration: 9.8,
            fall_acceleration: 9.8,
            coyote_window_seconds: 0.1,
            max_jump_hold_seconds: 0.3,
        }
    }
}

impl LocomotionConfig {
    /// Builder: set horizontal movement speed.
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set the jump impulse.
    pub fn with_jump_impulse(mut self, impulse: f32) -> Self {
        self.jump_impulse = impulse;
        self
    }

    /// Builder: set hold and fall accelerations.
    pub fn with_accelerations(mut self, hold: f32, fall: f32) -> Self {
        self.jump_hold_acceleration = hold;
        self.fall_acceleration = fall;
        self
    }

    /// Builder: set the coyote grace window.
    pub fn with_coyote_window(mut self, seconds: f32) -> Self {
        self.coyote_window_seconds = seconds;
        self
    }

    /// Builder: set the maximum jump hold duration.
    pub fn with_max_jump_hold(mut self, seconds: f32) -> Self {
        self.max_jump_hold_seconds = seconds;
        self
    }
}

/// Externally supplied config record with every tunable optional.
///
/// This is the deserialization target for whatever storage the host uses
/// (a settings file, an asset, a test literal). Resolve it into a
/// [`LocomotionConfig`] before building a controller:
///
/// ```rust
/// use platformer_locomotion::config::RawLocomotionConfig;
///
/// let raw: RawLocomotionConfig = serde_json::from_str(
///     r#"{
///         "move_speed": 8.0,
///         "jump_impulse": 9.8,
///         "jump_hold_acceleration": 9.8,
///         "fall_acceleration": 9.8,
///         "coyote_window_seconds": 0.1,
///         "max_jump_hold_seconds": 0.3
///     }"#,
/// )
/// .unwrap();
/// let config = raw.resolve().expect("all tunables supplied");
/// assert_eq!(config.move_speed, 8.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocomotionConfig {
    pub move_speed: Option<f32>,
    pub jump_impulse: Option<f32>,
    pub jump_hold_acceleration: Option<f32>,
    pub fall_acceleration: Option<f32>,
    pub coyote_window_seconds: Option<f32>,
    pub max_jump_hold_seconds: Option<f32>,
}

impl RawLocomotionConfig {
    /// Create a raw record carrying every field of a resolved config.
    pub fn from_config(config: LocomotionConfig) -> Self {
        Self {
            move_speed: Some(config.move_speed),
            jump_impulse: Some(config.jump_impulse),
            jump_hold_acceleration: Some(config.jump_hold_acceleration),
            fall_acceleration: Some(config.fall_acceleration),
            coyote_window_seconds: Some(config.coyote_window_seconds),
            max_jump_hold_seconds: Some(config.max_jump_hold_seconds),
        }
    }

    /// Resolve the record into a complete config.
    ///
    /// Fails with [`ConfigError::MissingField`] naming the first absent
    /// tunable. Callers abort character initialization on error; there are
    /// no silent defaults on this path.
    pub fn resolve(self) -> Result<LocomotionConfig, ConfigError> {
        fn require(value: Option<f32>, field: &'static str) -> Result<f32, ConfigError> {
            value.ok_or_else(|| {
                let fault = ConfigError::MissingField(field);
                error!("{fault}; aborting character initialization");
                fault
            })
        }

        Ok(LocomotionConfig {
            move_speed: require(self.move_speed, "move_speed")?,
            jump_impulse: require(self.jump_impulse, "jump_impulse")?,
            jump_hold_acceleration: require(
                self.jump_hold_acceleration,
                "jump_hold_acceleration",
            )?,
            fall_acceleration: require(self.fall_acceleration, "fall_acceleration")?,
            coyote_window_seconds: require(
                self.coyote_window_seconds,
                "coyote_window_seconds",
            )?,
            max_jump_hold_seconds: require(
                self.max_jump_hold_seconds,
                "max_jump_hold_seconds",
            )?,
        })
    }
}

/// Fatal configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A tunable was not supplied by the provider record.
    MissingField(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(field) => {
                write!(f, "missing locomotion tunable '{field}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
