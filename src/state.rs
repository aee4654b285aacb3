//! Shared motion state and the derived animation state.

use bevy::prelude::*;

/// Symmetric epsilon band (units/second) around zero vertical velocity for
/// animation derivation. A vertical speed at or inside the band never
/// selects jump/fall, which avoids state flicker at the top of an arc.
pub const ANIM_VELOCITY_EPSILON: f32 = 0.3;

/// Mutable motion snapshot shared by all movement modules.
///
/// Owned by the [`MovementController`](crate::controller::MovementController);
/// modules read it freely, but each module writes only the velocity axis it
/// [claims](crate::module::MovementModule::axis), and velocity is mutated
/// only inside the execution pass. The facing sign is the one exception:
/// it flips during the input pass so the visual turn is immediate even
/// when movement is blocked.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Current linear velocity of the body.
    pub velocity: Vec2,
    /// Whether the ground sensor reported contact at the start of the tick.
    pub grounded: bool,
    /// Whether the wall sensor reported contact at the start of the tick.
    pub wall_contact: bool,
    /// Facing sign: `1.0` for right, `-1.0` for left.
    pub facing: f32,
    /// Ground-locomotion signal: horizontal intent is non-zero and the
    /// character is not meaningfully moving vertically. Consumed by
    /// animation derivation.
    pub is_moving: bool,
    /// Whether the controller currently runs its input/execution passes.
    pub control_enabled: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            grounded: false,
            wall_contact: false,
            facing: 1.0,
            is_moving: false,
            control_enabled: true,
        }
    }
}

impl MotionState {
    /// Check if the character faces right.
    pub fn facing_right(&self) -> bool {
        self.facing > 0.0
    }

    /// Check if the character faces left.
    pub fn facing_left(&self) -> bool {
        self.facing < 0.0
    }
}

/// Discrete animation state, derived from motion every execution tick.
///
/// Never stored as independent truth; hosts map it onto their animator.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl AnimState {
    /// Derive the animation state from the current motion.
    ///
    /// Fall wins below `-ANIM_VELOCITY_EPSILON`, jump above
    /// `+ANIM_VELOCITY_EPSILON`; a vertical speed exactly at either
    /// threshold resolves toward run/idle.
    pub fn derive(motion: &MotionState) -> Self {
        if motion.velocity.y < -ANIM_VELOCITY_EPSILON {
            AnimState::Fall
        } else if motion.velocity.y > ANIM_VELOCITY_EPSILON {
            AnimState::Jump
        } else if motion.is_moving {
            AnimState::Run
        } else {
            AnimState::Idle
        }
    }
}
