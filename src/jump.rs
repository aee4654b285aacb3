//! Jump module: impulse, coyote grace, double jump and capped hold ascent.
//!
//! The module owns the vertical velocity axis *and* gravity: every tick
//! that is not part of a held ascent applies fall acceleration, and the
//! integrator resolves the resulting ground contact. Splitting the
//! instantaneous impulse from the continuous hold acceleration is what
//! gives variable jump height — a tap produces a low hop, a full hold a
//! full-height arc bounded by the hold cap.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::input::{Action, ActionState};
use crate::module::{Axis, ModuleError, MovementModule};
use crate::state::MotionState;

/// Downward-velocity tolerance (units/second) under which a grounded
/// character counts as landed for the ascent reset.
pub const LANDING_VELOCITY_EPSILON: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
struct JumpSettings {
    impulse: f32,
    hold_acceleration: f32,
    fall_acceleration: f32,
    coyote_window: f32,
    max_hold: f32,
}

/// Jump timing state, owned exclusively by the [`JumpModule`].
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    /// An ascent is active and still eligible for hold acceleration.
    pub is_holding_jump: bool,
    /// The one double jump of the current airborne excursion was used.
    pub double_jump_consumed: bool,
    /// Seconds remaining in which a ground jump is still legal after
    /// leaving ground. Refreshed to the configured window on every
    /// grounded tick, decays linearly while airborne, floored at zero.
    pub coyote_timer: f32,
    /// Seconds the jump button has been continuously honored this ascent.
    /// Never exceeds the configured cap; resets to zero whenever the
    /// ascent is interrupted.
    pub hold_timer: f32,
    /// The character is airborne because of a jump, not a fall. Blocks the
    /// coyote grace so an ascent already in progress can never re-qualify
    /// as a ground jump.
    pub airborne_from_jump: bool,
    was_grounded: bool,
}

/// Movement module owning the vertical velocity axis.
///
/// An ascent starts on a jump press that is legal in one of three ways,
/// checked in order: grounded, airborne within the coyote window of a
/// fall, or airborne with the double jump enabled and unconsumed. The
/// press and release edges are latched during the input pass; legality is
/// evaluated and the impulse applied on the next execution tick, and an
/// illegal press is discarded rather than buffered.
#[derive(Debug)]
pub struct JumpModule {
    double_jump_enabled: bool,
    settings: Option<JumpSettings>,
    state: JumpState,
    pending_press: bool,
    held: bool,
}

impl JumpModule {
    /// Create a jump module; `double_jump_enabled` grants one extra
    /// mid-air ascent per airborne excursion.
    pub fn new(double_jump_enabled: bool) -> Self {
        Self {
            double_jump_enabled,
            settings: None,
            state: JumpState::default(),
            pending_press: false,
            held: false,
        }
    }

    /// Read access to the jump timing state.
    pub fn state(&self) -> &JumpState {
        &self.state
    }

    /// Whether the double jump ability is enabled.
    pub fn double_jump_enabled(&self) -> bool {
        self.double_jump_enabled
    }

    fn try_start_ascent(&mut self, motion: &mut MotionState, settings: &JumpSettings) {
        let legal = if motion.grounded {
            // A ground jump also refreshes the airborne allowance.
            self.state.double_jump_consumed = false;
            true
        } else if self.state.coyote_timer > 0.0 && !self.state.airborne_from_jump {
            true
        } else if self.double_jump_enabled && !self.state.double_jump_consumed {
            self.state.double_jump_consumed = true;
            true
        } else {
            false
        };

        if legal {
            motion.velocity.y += settings.impulse;
            self.state.is_holding_jump = true;
            self.state.hold_timer = 0.0;
            self.state.coyote_timer = 0.0;
            self.state.airborne_from_jump = true;
        }
    }

    fn reset_ascent(&mut self) {
        self.state.is_holding_jump = false;
        self.state.hold_timer = 0.0;
    }
}

impl MovementModule for JumpModule {
    fn name(&self) -> &'static str {
        "jump"
    }

    fn axis(&self) -> Option<Axis> {
        Some(Axis::Vertical)
    }

    fn load_config(&mut self, config: &LocomotionConfig) {
        self.settings = Some(JumpSettings {
            impulse: config.jump_impulse,
            hold_acceleration: config.jump_hold_acceleration,
            fall_acceleration: config.fall_acceleration,
            coyote_window: config.coyote_window_seconds,
            max_hold: config.max_jump_hold_seconds,
        });
    }

    fn sample_input(&mut self, actions: &ActionState, _motion: &mut MotionState) {
        if actions.just_pressed(Action::Jump) {
            self.pending_press = true;
        }
        self.held = actions.is_down(Action::Jump);
        if actions.just_released(Action::Jump) {
            // Cutting a jump short takes effect immediately, regardless of
            // elapsed hold time.
            self.state.is_holding_jump = false;
        }
    }

    fn step(&mut self, motion: &mut MotionState, dt: f32) -> Result<(), ModuleError> {
        let settings = self.settings.ok_or(ModuleError::NotConfigured {
            module: self.name(),
        })?;

        // Coyote window bookkeeping runs every tick, regardless of jump
        // state.
        if motion.grounded {
            self.state.coyote_timer = settings.coyote_window;
        } else {
            self.state.coyote_timer = (self.state.coyote_timer - dt).max(0.0);
        }

        // One airborne excursion ends exactly when grounded flips back on.
        if motion.grounded && !self.state.was_grounded {
            self.state.double_jump_consumed = false;
            self.state.airborne_from_jump = false;
        }

        if self.pending_press {
            self.pending_press = false;
            self.try_start_ascent(motion, &settings);
        }

        if self.state.is_holding_jump && self.held && self.state.hold_timer < settings.max_hold
        {
            motion.velocity.y += settings.hold_acceleration * dt;
            self.state.hold_timer = (self.state.hold_timer + dt).min(settings.max_hold);
            if self.state.hold_timer >= settings.max_hold {
                // Cap reached: the ascent is over even if the button stays
                // held.
                self.state.is_holding_jump = false;
            }
        } else {
            self.state.hold_timer = 0.0;
            motion.velocity.y -= settings.fall_acceleration * dt;
        }

        // Landing forces a full ascent reset so no residual hold carries
        // into the next jump.
        if motion.grounded && motion.velocity.y <= LANDING_VELOCITY_EPSILON {
            self.reset_ascent();
        }

        self.state.was_grounded = motion.grounded;
        Ok(())
    }

    fn on_activate(&mut self) {
        self.reset_ascent();
    }

    fn on_deactivate(&mut self) {
        self.state = JumpState::default();
        self.pending_press = false;
        self.held = false;
    }
}
