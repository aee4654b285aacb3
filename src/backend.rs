//! Physics backend abstraction.
//!
//! The controller treats the physics engine as an opaque integrator: it
//! reads a body's velocity at the start of the execution pass, writes the
//! mutated velocity back at the end, and teleports the body during a
//! respawn. This trait is the seam that keeps the controller logic
//! engine-agnostic.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the locomotion
/// controller. The backend only needs velocity and position access; contact
/// sensing is fed separately through [`ContactSensor`](crate::sensor::ContactSensor)
/// notifications.
///
/// For an example implementation, see the `rapier` module's
/// `Rapier2dBackend` (feature `rapier2d`).
pub trait PhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current linear velocity of an entity.
    fn velocity(world: &World, entity: Entity) -> Vec2;

    /// Set the linear velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2);

    /// Get the current position of an entity.
    fn position(world: &World, entity: Entity) -> Vec2;

    /// Teleport an entity to a position.
    fn set_position(world: &mut World, entity: Entity, position: Vec2);

    /// Get the fixed timestep delta time in seconds.
    ///
    /// Falls back to 60 Hz when `Time<Fixed>` is absent or has not
    /// advanced (e.g., when a test drives the schedule manually).
    fn fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&dt| dt > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
