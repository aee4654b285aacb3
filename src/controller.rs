//! The movement controller: module orchestration and the two passes.
//!
//! The controller owns an ordered list of movement modules, the shared
//! [`MotionState`], and references to the ground and wall sensors. Every
//! simulation frame it forwards an input-sampling pass to every module;
//! every fixed physics tick it aggregates sensor contacts once, forwards
//! an execution pass, writes the mutated velocity back to the body, and
//! derives the animation state.

use std::fmt;

use bevy::log::error;
use bevy::prelude::*;

use crate::backend::PhysicsBackend;
use crate::config::LocomotionConfig;
use crate::input::ActionState;
use crate::module::{Axis, MovementModule};
use crate::sensor::ContactSensor;
use crate::state::{AnimState, MotionState};

/// Velocity policy applied when control is disabled.
///
/// Disabling control always zeroes the horizontal velocity component on
/// the next execution tick. Whether the vertical component is zeroed too
/// is a caller decision: `Horizontal` leaves it untouched so the body
/// keeps settling under gravity during scripted freezes, `Full` stops the
/// body dead (the respawn sequencer uses this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HaltMode {
    /// Zero only the horizontal velocity component.
    #[default]
    Horizontal,
    /// Zero the entire velocity vector.
    Full,
}

/// Error raised while building a [`MovementController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// Two registered modules claimed the same velocity axis.
    DuplicateAxisClaim {
        axis: Axis,
        module: &'static str,
    },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::DuplicateAxisClaim { axis, module } => {
                write!(f, "module '{module}' claims the already-owned {axis:?} axis")
            }
        }
    }
}

impl std::error::Error for ControllerError {}

/// Orchestrator component driving an ordered list of movement modules.
#[derive(Component)]
pub struct MovementController {
    modules: Vec<Box<dyn MovementModule>>,
    motion: MotionState,
    anim_state: AnimState,
    ground_sensor: Entity,
    wall_sensor: Entity,
    pending_halt: Option<HaltMode>,
}

impl std::fmt::Debug for MovementController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovementController")
            .field(
                "modules",
                &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("motion", &self.motion)
            .field("anim_state", &self.anim_state)
            .field("ground_sensor", &self.ground_sensor)
            .field("wall_sensor", &self.wall_sensor)
            .field("pending_halt", &self.pending_halt)
            .finish()
    }
}

impl MovementController {
    /// Start building a controller bound to the given sensor entities.
    pub fn builder(ground_sensor: Entity, wall_sensor: Entity) -> MovementControllerBuilder {
        MovementControllerBuilder {
            modules: Vec::new(),
            ground_sensor,
            wall_sensor,
        }
    }

    /// The entity of the ground contact sensor.
    pub fn ground_sensor(&self) -> Entity {
        self.ground_sensor
    }

    /// The entity of the wall contact sensor.
    pub fn wall_sensor(&self) -> Entity {
        self.wall_sensor
    }

    /// Read-only view of the shared motion state.
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// The animation state derived on the last execution tick.
    pub fn anim_state(&self) -> AnimState {
        self.anim_state
    }

    /// Whether the ground sensor reported contact on the last tick.
    pub fn is_grounded(&self) -> bool {
        self.motion.grounded
    }

    /// Whether the controller currently runs its passes.
    pub fn is_control_enabled(&self) -> bool {
        self.motion.control_enabled
    }

    /// Enable or disable the controller.
    ///
    /// Disabling suppresses both passes until re-enabled and applies
    /// `halt` to the body's velocity on the very next execution tick.
    /// `halt` is only consulted when disabling. The call is idempotent:
    /// repeated disables (or enables) are no-ops beyond the first.
    pub fn set_control_enabled(&mut self, enabled: bool, halt: HaltMode) {
        if self.motion.control_enabled == enabled {
            return;
        }
        self.motion.control_enabled = enabled;
        if !enabled {
            self.pending_halt = Some(halt);
        }
    }

    /// Reset motion and module state, typically inside a control-disabled
    /// respawn window.
    ///
    /// Zeroes the tracked velocity and motion signals and cycles every
    /// module through its deactivate/activate hooks so internal timers
    /// start fresh.
    pub fn reset(&mut self) {
        self.motion.velocity = Vec2::ZERO;
        self.motion.grounded = false;
        self.motion.wall_contact = false;
        self.motion.is_moving = false;
        self.anim_state = AnimState::Idle;
        for module in &mut self.modules {
            module.on_deactivate();
            module.on_activate();
        }
    }

    /// Input pass: forward the action snapshot to every module.
    pub(crate) fn sample_input(&mut self, actions: &ActionState) {
        if !self.motion.control_enabled {
            return;
        }
        for module in &mut self.modules {
            module.sample_input(actions, &mut self.motion);
        }
    }

    /// Execution pass over a consistent sensor/velocity snapshot.
    ///
    /// Returns the velocity to write back to the body, or `None` when
    /// control is disabled and no halt is pending.
    pub(crate) fn execute(
        &mut self,
        velocity: Vec2,
        grounded: bool,
        wall_contact: bool,
        dt: f32,
    ) -> Option<Vec2> {
        self.motion.velocity = velocity;
        self.motion.grounded = grounded;
        self.motion.wall_contact = wall_contact;

        if let Some(halt) = self.pending_halt.take() {
            match halt {
                HaltMode::Horizontal => self.motion.velocity.x = 0.0,
                HaltMode::Full => self.motion.velocity = Vec2::ZERO,
            }
            if !self.motion.control_enabled {
                return Some(self.motion.velocity);
            }
        }

        if !self.motion.control_enabled {
            return None;
        }

        for module in &mut self.modules {
            if let Err(fault) = module.step(&mut self.motion, dt) {
                // A failing module must not abort the tick for its
                // siblings.
                error!("movement module '{}' failed: {fault}", module.name());
            }
        }

        self.anim_state = AnimState::derive(&self.motion);
        Some(self.motion.velocity)
    }
}

/// Ordered module registration for a [`MovementController`].
///
/// Registration order is execution order. `build` validates that no two
/// modules claim the same velocity axis, then loads the config into every
/// module and fires their activation hooks.
pub struct MovementControllerBuilder {
    modules: Vec<Box<dyn MovementModule>>,
    ground_sensor: Entity,
    wall_sensor: Entity,
}

impl MovementControllerBuilder {
    /// Append a module to the execution order.
    pub fn register(mut self, module: impl MovementModule) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Validate axis claims and produce the controller.
    pub fn build(mut self, config: &LocomotionConfig) -> Result<MovementController, ControllerError> {
        let mut claimed: Vec<Axis> = Vec::new();
        for module in &self.modules {
            if let Some(axis) = module.axis() {
                if claimed.contains(&axis) {
                    return Err(ControllerError::DuplicateAxisClaim {
                        axis,
                        module: module.name(),
                    });
                }
                claimed.push(axis);
            }
        }

        for module in &mut self.modules {
            module.load_config(config);
            module.on_activate();
        }

        Ok(MovementController {
            modules: self.modules,
            motion: MotionState::default(),
            anim_state: AnimState::Idle,
            ground_sensor: self.ground_sensor,
            wall_sensor: self.wall_sensor,
            pending_halt: None,
        })
    }
}

/// Input pass: let every controller's modules sample the action snapshot.
pub fn sample_module_input(
    actions: Res<ActionState>,
    mut controllers: Query<&mut MovementController>,
) {
    for mut controller in &mut controllers {
        controller.sample_input(&actions);
    }
}

/// Execution pass: aggregate sensors, run the modules, write velocity
/// back, derive animation.
pub fn execute_movement<B: PhysicsBackend>(world: &mut World) {
    let dt = B::fixed_timestep(world);

    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<MovementController>>()
        .iter(world)
        .collect();

    for entity in entities {
        let (ground_sensor, wall_sensor) = {
            let Some(controller) = world.get::<MovementController>(entity) else {
                continue;
            };
            (controller.ground_sensor(), controller.wall_sensor())
        };

        // One sensor snapshot per tick; every module observes the same
        // grounded/wall state even if contact callbacks arrive mid-pass.
        let grounded = world
            .get::<ContactSensor>(ground_sensor)
            .map(|sensor| sensor.touching())
            .unwrap_or(false);
        let wall_contact = world
            .get::<ContactSensor>(wall_sensor)
            .map(|sensor| sensor.touching())
            .unwrap_or(false);
        let velocity = B::velocity(world, entity);

        let written = {
            let Some(mut controller) = world.get_mut::<MovementController>(entity) else {
                continue;
            };
            controller.execute(velocity, grounded, wall_contact, dt)
        };

        if let Some(new_velocity) = written {
            B::set_velocity(world, entity, new_velocity);
        }
    }
}
