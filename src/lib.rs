//! # `platformer_locomotion`
//!
//! A modular 2D platformer locomotion controller for Bevy.
//!
//! This crate simulates the movement of a platforming character:
//! - Direct-velocity horizontal movement with wall blocking
//! - A timing-sensitive jump with a coyote grace window, an optional
//!   double jump, and variable jump height (hold the button for a higher
//!   arc, capped by a maximum hold duration)
//! - Tag-filtered contact sensors for ground and wall detection
//! - A derived animation state (idle / run / jump / fall)
//!
//! ## Architecture
//!
//! Movement behavior is decomposed into **movement modules**
//! ([`MovementModule`](module::MovementModule)) registered in an explicit
//! order on a [`MovementController`](controller::MovementController). Each
//! module declares which velocity axis it owns, so no two modules can race
//! on the same component within one tick.
//!
//! The controller drives two passes per simulation frame:
//! 1. An **input pass** on `Update`: every module samples the current
//!    [`ActionState`](input::ActionState) snapshot.
//! 2. An **execution pass** on `FixedUpdate`: sensor contacts are
//!    aggregated once into a shared [`MotionState`](state::MotionState),
//!    every module mutates the velocity axis it owns, the result is
//!    written back to the physics body, and the animation state is
//!    derived.
//!
//! Physics is abstracted behind [`PhysicsBackend`](backend::PhysicsBackend)
//! so the controller logic is engine-agnostic; a Rapier2D implementation
//! ships behind the `rapier2d` feature.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_rapier2d::prelude::*;
//! use platformer_locomotion::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(TransformPlugin)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
//!     .add_plugins(LocomotionPlugin::<Rapier2dBackend>::default())
//!     .run();
//! ```
//!
//! Spawning a character:
//!
//! ```rust
//! use bevy::prelude::*;
//! use platformer_locomotion::prelude::*;
//!
//! fn spawn_character(mut commands: Commands) {
//!     let config = RawLocomotionConfig {
//!         move_speed: Some(8.0),
//!         jump_impulse: Some(9.8),
//!         jump_hold_acceleration: Some(9.8),
//!         fall_acceleration: Some(9.8),
//!         coyote_window_seconds: Some(0.1),
//!         max_jump_hold_seconds: Some(0.3),
//!     }
//!     .resolve()
//!     .expect("locomotion tunables are complete");
//!
//!     let ground_sensor = commands
//!         .spawn(ContactSensor::new(SurfaceTag::GROUND))
//!         .id();
//!     let wall_sensor = commands.spawn(ContactSensor::new(SurfaceTag::WALL)).id();
//!
//!     let controller = MovementController::builder(ground_sensor, wall_sensor)
//!         .register(WalkModule::new())
//!         .register(JumpModule::new(true))
//!         .build(&config)
//!         .expect("axis claims are unique");
//!
//!     commands.spawn((controller, Transform::default()));
//! }
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod controller;
pub mod input;
pub mod jump;
pub mod module;
pub mod respawn;
pub mod sensor;
pub mod state;
pub mod walk;

#[cfg(feature = "rapier2d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{NoOpBackendPlugin, PhysicsBackend};
    pub use crate::config::{ConfigError, LocomotionConfig, RawLocomotionConfig};
    pub use crate::controller::{
        ControllerError, HaltMode, MovementController, MovementControllerBuilder,
    };
    pub use crate::input::{Action, ActionState, Binding, InputBindings};
    pub use crate::jump::{JumpModule, JumpState};
    pub use crate::module::{Axis, ModuleError, MovementModule};
    pub use crate::respawn::{
        RespawnCompleted, RespawnRequested, RespawnSequencer, RespawnStarted,
    };
    pub use crate::sensor::{ContactSensor, SurfaceTag};
    pub use crate::state::{AnimState, MotionState};
    pub use crate::walk::WalkModule;
    pub use crate::{LocomotionPlugin, LocomotionSet};

    #[cfg(feature = "rapier2d")]
    pub use crate::rapier::{ContactSensorBundle, Rapier2dBackend, Rapier2dCharacterBundle};
}

/// System sets for the two locomotion passes.
///
/// `Input` runs on `Update` (variable rate), `Execute` on `FixedUpdate`
/// (fixed rate). External systems that feed sensors or toggle control can
/// order themselves against these sets.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Action-state refresh and per-module input sampling.
    Input,
    /// Sensor aggregation, per-module execution, velocity write-back and
    /// animation derivation.
    Execute,
}

/// Main plugin for the locomotion system.
///
/// Generic over a [`PhysicsBackend`](backend::PhysicsBackend) `B` which
/// provides velocity and position access for character bodies.
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier2dBackend`)
pub struct LocomotionPlugin<B: backend::PhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::PhysicsBackend> Default for LocomotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::PhysicsBackend> Plugin for LocomotionPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::LocomotionConfig>();
        app.register_type::<state::MotionState>();
        app.register_type::<state::AnimState>();
        app.register_type::<module::Axis>();
        app.register_type::<jump::JumpState>();

        // Hosts without Bevy's InputPlugin (headless tests) still need the
        // key state resource the input pass reads.
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<input::InputBindings>();
        app.init_resource::<input::ActionState>();

        app.add_event::<respawn::RespawnRequested>();
        app.add_event::<respawn::RespawnStarted>();
        app.add_event::<respawn::RespawnCompleted>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        app.add_systems(
            Update,
            (input::update_action_state, controller::sample_module_input)
                .chain()
                .in_set(LocomotionSet::Input),
        );
        app.add_systems(
            Update,
            respawn::drive_respawn::<B>.after(LocomotionSet::Input),
        );
        app.add_systems(
            FixedUpdate,
            controller::execute_movement::<B>.in_set(LocomotionSet::Execute),
        );
    }
}
