//! The movement module contract.
//!
//! A movement module is one independently pluggable unit of locomotion
//! behavior (walking, jumping). Modules share a single
//! [`MotionState`](crate::state::MotionState) passed explicitly into each
//! call; ownership of each velocity axis is declared through
//! [`MovementModule::axis`] and validated when the controller is built.

use std::fmt;

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::input::ActionState;
use crate::state::MotionState;

/// Velocity component a module claims exclusive write access to.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Polymorphic unit of locomotion behavior.
///
/// The controller invokes modules in registration order, twice per
/// simulation frame: [`sample_input`](Self::sample_input) on the
/// variable-rate input pass and [`step`](Self::step) on the fixed-rate
/// execution pass. Velocity must only be mutated inside `step`.
pub trait MovementModule: Send + Sync + 'static {
    /// Stable name used in log messages.
    fn name(&self) -> &'static str;

    /// The velocity axis this module writes during `step`, if any.
    ///
    /// At most one registered module may claim each axis; the controller
    /// builder rejects duplicates so write conflicts are impossible by
    /// construction rather than by list order.
    fn axis(&self) -> Option<Axis>;

    /// Copy the tunables this module needs out of the resolved config.
    fn load_config(&mut self, config: &LocomotionConfig);

    /// Input pass: sample the current action snapshot.
    ///
    /// Runs at frame rate; may latch edges for the next `step` and may
    /// update the facing sign, but must not touch velocity.
    fn sample_input(&mut self, actions: &ActionState, motion: &mut MotionState);

    /// Execution pass: advance the module by `dt` seconds, mutating the
    /// claimed velocity axis.
    ///
    /// A failing module does not abort the tick for its siblings; the
    /// controller logs the fault and continues.
    fn step(&mut self, motion: &mut MotionState, dt: f32) -> Result<(), ModuleError>;

    /// Hook invoked when the module becomes active (controller build,
    /// respawn reset).
    fn on_activate(&mut self) {}

    /// Hook invoked when the module is deactivated (respawn reset).
    fn on_deactivate(&mut self) {}
}

/// Per-module execution fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleError {
    /// `step` was invoked before `load_config`.
    NotConfigured { module: &'static str },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::NotConfigured { module } => {
                write!(f, "module '{module}' stepped before its config was loaded")
            }
        }
    }
}

impl std::error::Error for ModuleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_display_names_the_module() {
        let err = ModuleError::NotConfigured { module: "walk" };
        assert!(err.to_string().contains("walk"));
    }
}
