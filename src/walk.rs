//! Horizontal movement module.

use crate::config::LocomotionConfig;
use crate::input::{Action, ActionState};
use crate::module::{Axis, ModuleError, MovementModule};
use crate::state::MotionState;

/// Vertical speed (units/second) below which non-zero horizontal intent
/// counts as ground locomotion for the `is_moving` signal.
pub const GROUND_MOTION_EPSILON: f32 = 0.3;

/// Movement module owning the horizontal velocity axis.
///
/// Input pass: reads the MoveLeft/MoveRight actions into a signed intent
/// in `{-1, 0, +1}`. Holding both directions cancels to zero — the
/// tie-break for simultaneous opposite presses. Non-zero intent flips the
/// facing sign immediately, independent of whether movement is currently
/// blocked.
///
/// Execution pass: wall contact forces horizontal velocity to zero for the
/// tick; otherwise velocity is assigned directly as
/// `intent * move_speed` with no acceleration ramp. The shared
/// `is_moving` signal is refreshed either way, so pushing against a wall
/// still reads as running.
#[derive(Debug, Default)]
pub struct WalkModule {
    move_speed: Option<f32>,
    intent: f32,
}

impl WalkModule {
    /// Create a walk module; tunables arrive via `load_config`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently sampled horizontal intent.
    pub fn intent(&self) -> f32 {
        self.intent
    }
}

impl MovementModule for WalkModule {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn axis(&self) -> Option<Axis> {
        Some(Axis::Horizontal)
    }

    fn load_config(&mut self, config: &LocomotionConfig) {
        self.move_speed = Some(config.move_speed);
    }

    fn sample_input(&mut self, actions: &ActionState, motion: &mut MotionState) {
        let mut intent = 0.0;
        if actions.is_down(Action::MoveLeft) {
            intent -= 1.0;
        }
        if actions.is_down(Action::MoveRight) {
            intent += 1.0;
        }
        self.intent = intent;

        if intent != 0.0 {
            motion.facing = intent.signum();
        }
    }

    fn step(&mut self, motion: &mut MotionState, _dt: f32) -> Result<(), ModuleError> {
        let move_speed = self.move_speed.ok_or(ModuleError::NotConfigured {
            module: self.name(),
        })?;

        if motion.wall_contact {
            motion.velocity.x = 0.0;
        } else {
            motion.velocity.x = self.intent * move_speed;
        }

        motion.is_moving =
            self.intent != 0.0 && motion.velocity.y.abs() < GROUND_MOTION_EPSILON;

        Ok(())
    }

    fn on_deactivate(&mut self) {
        self.intent = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> WalkModule {
        let mut module = WalkModule::new();
        module.load_config(&LocomotionConfig::default());
        module
    }

    fn press(actions: &mut ActionState, action: Action) {
        actions.apply(action, true);
    }

    #[test]
    fn step_before_load_config_fails() {
        let mut module = WalkModule::new();
        let mut motion = MotionState::default();
        let err = module.step(&mut motion, 1.0 / 60.0).unwrap_err();
        assert_eq!(err, ModuleError::NotConfigured { module: "walk" });
    }

    #[test]
    fn intent_from_single_direction() {
        let mut module = configured();
        let mut motion = MotionState::default();
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveRight);
        module.sample_input(&actions, &mut motion);
        assert_eq!(module.intent(), 1.0);

        actions.apply(Action::MoveRight, false);
        press(&mut actions, Action::MoveLeft);
        module.sample_input(&actions, &mut motion);
        assert_eq!(module.intent(), -1.0);
    }

    #[test]
    fn opposite_presses_cancel() {
        let mut module = configured();
        let mut motion = MotionState::default();
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveLeft);
        press(&mut actions, Action::MoveRight);
        module.sample_input(&actions, &mut motion);
        assert_eq!(module.intent(), 0.0);
    }

    #[test]
    fn facing_flips_on_intent_and_sticks() {
        let mut module = configured();
        let mut motion = MotionState::default();
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveLeft);
        module.sample_input(&actions, &mut motion);
        assert!(motion.facing_left());

        // Releasing leaves the last facing in place
        actions.apply(Action::MoveLeft, false);
        module.sample_input(&actions, &mut motion);
        assert!(motion.facing_left());
    }

    #[test]
    fn step_assigns_velocity_directly() {
        let mut module = configured();
        let mut motion = MotionState::default();
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveRight);
        module.sample_input(&actions, &mut motion);
        module.step(&mut motion, 1.0 / 60.0).unwrap();

        assert_eq!(motion.velocity.x, LocomotionConfig::default().move_speed);
        assert!(motion.is_moving);
    }

    #[test]
    fn wall_contact_zeroes_velocity_but_not_facing() {
        let mut module = configured();
        let mut motion = MotionState {
            wall_contact: true,
            ..Default::default()
        };
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveLeft);
        module.sample_input(&actions, &mut motion);
        module.step(&mut motion, 1.0 / 60.0).unwrap();

        assert_eq!(motion.velocity.x, 0.0);
        assert!(motion.facing_left());
        // Pushing into the wall still reads as running
        assert!(motion.is_moving);
    }

    #[test]
    fn airborne_motion_is_not_ground_locomotion() {
        let mut module = configured();
        let mut motion = MotionState::default();
        motion.velocity.y = 5.0;
        let mut actions = ActionState::default();

        press(&mut actions, Action::MoveRight);
        module.sample_input(&actions, &mut motion);
        module.step(&mut motion, 1.0 / 60.0).unwrap();

        assert!(!motion.is_moving);
        assert_eq!(motion.velocity.x, LocomotionConfig::default().move_speed);
    }

    #[test]
    fn no_intent_stops_horizontal_motion() {
        let mut module = configured();
        let mut motion = MotionState::default();
        motion.velocity.x = 8.0;

        let actions = ActionState::default();
        module.sample_input(&actions, &mut motion);
        module.step(&mut motion, 1.0 / 60.0).unwrap();

        assert_eq!(motion.velocity.x, 0.0);
        assert!(!motion.is_moving);
    }
}
