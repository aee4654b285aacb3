//! Rapier2D physics backend implementation.
//!
//! Enable with the `rapier2d` feature. Characters are dynamic,
//! rotation-locked bodies with Rapier gravity disabled (the jump module
//! owns gravity); sensors are tag-filtered trigger colliders whose
//! collision events are translated into [`ContactSensor`] notifications.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::backend::PhysicsBackend;
use crate::sensor::{ContactSensor, SurfaceTag};
use crate::LocomotionSet;

/// Rapier2D physics backend for the locomotion controller.
pub struct Rapier2dBackend;

impl PhysicsBackend for Rapier2dBackend {
    fn plugin() -> impl Plugin {
        Rapier2dBackendPlugin
    }

    fn velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<Velocity>(entity)
            .map(|velocity| velocity.linvel)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut component) = world.get_mut::<Velocity>(entity) {
            component.linvel = velocity;
        }
    }

    fn position(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<Transform>(entity)
            .map(|transform| transform.translation.truncate())
            .unwrap_or(Vec2::ZERO)
    }

    fn set_position(world: &mut World, entity: Entity, position: Vec2) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }
}

/// Plugin wiring Rapier collision events into contact sensors.
pub struct Rapier2dBackendPlugin;

impl Plugin for Rapier2dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Sensors are eventually-consistent: feeding them at frame rate is
        // enough, the execution pass snapshots them at tick start.
        app.add_systems(Update, sync_sensor_contacts.before(LocomotionSet::Input));
    }
}

/// Translate Rapier collision events into sensor begin/end notifications.
///
/// For each started/stopped pair, the side carrying a [`ContactSensor`]
/// is notified with the other entity and its [`SurfaceTag`]; untagged
/// geometry is ignored.
pub fn sync_sensor_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut sensors: Query<&mut ContactSensor>,
    tags: Query<&SurfaceTag>,
) {
    for event in collisions.read() {
        let (first, second, started) = match *event {
            CollisionEvent::Started(first, second, _) => (first, second, true),
            CollisionEvent::Stopped(first, second, _) => (first, second, false),
        };

        for (sensor_entity, other) in [(first, second), (second, first)] {
            let Ok(tag) = tags.get(other) else {
                continue;
            };
            let Ok(mut sensor) = sensors.get_mut(sensor_entity) else {
                continue;
            };
            if started {
                sensor.on_contact_begin(other, tag.name());
            } else {
                sensor.on_contact_end(other, tag.name());
            }
        }
    }
}

/// Physics components for a locomotion-controlled character body.
///
/// The body is dynamic so the integrator resolves contacts, rotation is
/// locked, and Rapier gravity is scaled to zero because fall acceleration
/// comes from the jump module.
#[derive(Bundle)]
pub struct Rapier2dCharacterBundle {
    pub rigid_body: RigidBody,
    pub velocity: Velocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl Rapier2dCharacterBundle {
    /// Create the standard rotation-locked character body.
    pub fn rotation_locked() -> Self {
        Self {
            rigid_body: RigidBody::Dynamic,
            velocity: Velocity::zero(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
        }
    }
}

impl Default for Rapier2dCharacterBundle {
    fn default() -> Self {
        Self::rotation_locked()
    }
}

/// Components for a tag-filtered contact sensor collider.
///
/// Spawn as a child of the character body, offset toward the surface it
/// watches (below the feet for ground, ahead of the chest for walls).
#[derive(Bundle)]
pub struct ContactSensorBundle {
    pub sensor: ContactSensor,
    pub marker: Sensor,
    pub collider: Collider,
    pub active_events: ActiveEvents,
    pub transform: Transform,
}

impl ContactSensorBundle {
    /// Create a sensor collider filtering for `tag`, offset from the
    /// parent body.
    pub fn new(tag: impl Into<String>, collider: Collider, offset: Vec2) -> Self {
        Self {
            sensor: ContactSensor::new(tag),
            marker: Sensor,
            collider,
            active_events: ActiveEvents::COLLISION_EVENTS,
            transform: Transform::from_translation(offset.extend(0.0)),
        }
    }

    /// A thin ground sensor strip under the feet.
    pub fn ground(half_width: f32, offset: Vec2) -> Self {
        Self::new(
            SurfaceTag::GROUND,
            Collider::cuboid(half_width, 0.05),
            offset,
        )
    }

    /// A thin wall sensor strip in front of the body.
    pub fn wall(half_height: f32, offset: Vec2) -> Self {
        Self::new(SurfaceTag::WALL, Collider::cuboid(0.05, half_height), offset)
    }
}
