//! Shared harness for the integration suites.
//!
//! Drives the full plugin pipeline against a deterministic in-memory
//! physics backend. Virtual time is paused so `FixedUpdate` only runs
//! when a test steps it explicitly; the backend's 60 Hz fallback makes
//! every tick exactly 1/60 s.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::Virtual;
use platformer_locomotion::prelude::*;

pub const DT: f32 = 1.0 / 60.0;

/// In-memory body state the test backend reads and writes.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TestBody {
    pub velocity: Vec2,
    pub position: Vec2,
}

/// Deterministic stand-in for the physics integrator.
pub struct TestBackend;

impl PhysicsBackend for TestBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<TestBody>(entity)
            .map(|body| body.velocity)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut body) = world.get_mut::<TestBody>(entity) {
            body.velocity = velocity;
        }
    }

    fn position(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<TestBody>(entity)
            .map(|body| body.position)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_position(world: &mut World, entity: Entity, position: Vec2) {
        if let Some(mut body) = world.get_mut::<TestBody>(entity) {
            body.position = position;
        }
    }
}

/// Create a minimal test app with the locomotion plugin.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(LocomotionPlugin::<TestBackend>::default());
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    app.finish();
    app.cleanup();

    // Pause virtual time so fixed ticks only happen via tick().
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app
}

/// A spawned character plus the entities feeding its sensors.
pub struct Character {
    pub entity: Entity,
    pub ground_sensor: Entity,
    pub wall_sensor: Entity,
    pub floor: Entity,
    pub wall: Entity,
}

/// Spawn a character with the standard walk + jump module set.
pub fn spawn_character(app: &mut App, config: &LocomotionConfig, double_jump: bool) -> Character {
    let ground_sensor = app
        .world_mut()
        .spawn(ContactSensor::new(SurfaceTag::GROUND))
        .id();
    let wall_sensor = app
        .world_mut()
        .spawn(ContactSensor::new(SurfaceTag::WALL))
        .id();

    let controller = MovementController::builder(ground_sensor, wall_sensor)
        .register(WalkModule::new())
        .register(JumpModule::new(double_jump))
        .build(config)
        .expect("standard module set has unique axis claims");

    let entity = app
        .world_mut()
        .spawn((controller, TestBody::default()))
        .id();
    let floor = app.world_mut().spawn_empty().id();
    let wall = app.world_mut().spawn_empty().id();

    Character {
        entity,
        ground_sensor,
        wall_sensor,
        floor,
        wall,
    }
}

/// Toggle the ground sensor the way a contact callback would.
pub fn set_grounded(app: &mut App, character: &Character, grounded: bool) {
    let floor = character.floor;
    let mut sensor = app
        .world_mut()
        .get_mut::<ContactSensor>(character.ground_sensor)
        .unwrap();
    if grounded {
        sensor.on_contact_begin(floor, SurfaceTag::GROUND);
    } else {
        sensor.on_contact_end(floor, SurfaceTag::GROUND);
    }
}

/// Toggle the wall sensor the way a contact callback would.
pub fn set_wall_contact(app: &mut App, character: &Character, contact: bool) {
    let wall = character.wall;
    let mut sensor = app
        .world_mut()
        .get_mut::<ContactSensor>(character.wall_sensor)
        .unwrap();
    if contact {
        sensor.on_contact_begin(wall, SurfaceTag::WALL);
    } else {
        sensor.on_contact_end(wall, SurfaceTag::WALL);
    }
}

/// Press a key on the raw input resource.
pub fn press_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

/// Release a key on the raw input resource.
pub fn release_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Run one simulation frame: the input pass, one fixed execution tick,
/// then the integrator stand-in resolving ground contact.
pub fn tick(app: &mut App, character: &Character) {
    app.update();
    app.world_mut().run_schedule(FixedUpdate);
    resolve_ground_contact(app, character);
}

/// Run `frames` simulation frames.
pub fn run_frames(app: &mut App, character: &Character, frames: usize) {
    for _ in 0..frames {
        tick(app, character);
    }
}

/// The integrator stand-in: a grounded body cannot keep downward
/// velocity, the floor supports it.
fn resolve_ground_contact(app: &mut App, character: &Character) {
    let grounded = app
        .world()
        .get::<ContactSensor>(character.ground_sensor)
        .map(|sensor| sensor.touching())
        .unwrap_or(false);
    if !grounded {
        return;
    }
    if let Some(mut body) = app.world_mut().get_mut::<TestBody>(character.entity) {
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
    }
}

/// Read the character's body state.
pub fn body(app: &App, character: &Character) -> TestBody {
    *app.world().get::<TestBody>(character.entity).unwrap()
}

/// Borrow the character's controller.
pub fn controller<'a>(app: &'a App, character: &Character) -> &'a MovementController {
    app.world()
        .get::<MovementController>(character.entity)
        .unwrap()
}

/// Mutably borrow the character's controller.
pub fn controller_mut<'a>(
    app: &'a mut App,
    character: &Character,
) -> Mut<'a, MovementController> {
    app.world_mut()
        .get_mut::<MovementController>(character.entity)
        .unwrap()
}
