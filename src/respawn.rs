//! Respawn sequencing against the controller's control surface.
//!
//! External collaborators (hazard triggers, level transitions) request a
//! respawn with a [`RespawnRequested`] event. The sequencer then runs
//! disable → delay → teleport → reset → enable as one observable
//! sequence, announced through [`RespawnStarted`] and
//! [`RespawnCompleted`]. Visual feedback (flashing, invulnerability) is
//! the host's concern.

use bevy::prelude::*;

use crate::backend::PhysicsBackend;
use crate::controller::{HaltMode, MovementController};

/// Request a respawn of the given character.
#[derive(Event, Debug, Clone, Copy)]
pub struct RespawnRequested {
    pub entity: Entity,
}

/// A respawn sequence began: control is disabled, the delay is running.
#[derive(Event, Debug, Clone, Copy)]
pub struct RespawnStarted {
    pub entity: Entity,
}

/// A respawn sequence finished: the body was teleported, module state
/// reset, and control re-enabled.
#[derive(Event, Debug, Clone, Copy)]
pub struct RespawnCompleted {
    pub entity: Entity,
}

/// Per-character respawn sequencer.
#[derive(Component, Debug)]
pub struct RespawnSequencer {
    respawn_point: Vec2,
    delay: Timer,
    active: bool,
}

impl RespawnSequencer {
    /// Create a sequencer returning the character to `respawn_point`
    /// after `delay_seconds` of disabled control.
    pub fn new(respawn_point: Vec2, delay_seconds: f32) -> Self {
        Self {
            respawn_point,
            delay: Timer::from_seconds(delay_seconds, TimerMode::Once),
            active: false,
        }
    }

    /// The position the character is returned to.
    pub fn respawn_point(&self) -> Vec2 {
        self.respawn_point
    }

    /// Move the respawn point (checkpoint reached).
    pub fn set_respawn_point(&mut self, point: Vec2) {
        self.respawn_point = point;
    }

    /// Whether a sequence is currently running.
    pub fn is_respawning(&self) -> bool {
        self.active
    }
}

/// Drain respawn requests and advance running sequences.
pub fn drive_respawn<B: PhysicsBackend>(world: &mut World) {
    let requested: Vec<Entity> = world
        .resource_mut::<Events<RespawnRequested>>()
        .drain()
        .map(|event| event.entity)
        .collect();

    for entity in requested {
        let accepted = {
            let Some(mut sequencer) = world.get_mut::<RespawnSequencer>(entity) else {
                continue;
            };
            if sequencer.active {
                // Already respawning; the request is dropped.
                false
            } else {
                sequencer.active = true;
                sequencer.delay.reset();
                true
            }
        };
        if !accepted {
            continue;
        }

        if let Some(mut controller) = world.get_mut::<MovementController>(entity) {
            controller.set_control_enabled(false, HaltMode::Full);
        }
        world.send_event(RespawnStarted { entity });
    }

    let delta = world.resource::<Time>().delta();
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<RespawnSequencer>>()
        .iter(world)
        .collect();

    for entity in entities {
        let respawn_point = {
            let Some(mut sequencer) = world.get_mut::<RespawnSequencer>(entity) else {
                continue;
            };
            if !sequencer.active {
                continue;
            }
            sequencer.delay.tick(delta);
            if !sequencer.delay.finished() {
                continue;
            }
            sequencer.active = false;
            sequencer.respawn_point()
        };

        // Teleport, reset, re-enable: atomic from the caller's view.
        B::set_position(world, entity, respawn_point);
        B::set_velocity(world, entity, Vec2::ZERO);
        if let Some(mut controller) = world.get_mut::<MovementController>(entity) {
            controller.reset();
            controller.set_control_enabled(true, HaltMode::Full);
        }
        world.send_event(RespawnCompleted { entity });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencer_starts_idle() {
        let sequencer = RespawnSequencer::new(Vec2::new(4.0, 2.0), 0.5);
        assert!(!sequencer.is_respawning());
        assert_eq!(sequencer.respawn_point(), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn respawn_point_is_movable() {
        let mut sequencer = RespawnSequencer::new(Vec2::ZERO, 0.5);
        sequencer.set_respawn_point(Vec2::new(10.0, -3.0));
        assert_eq!(sequencer.respawn_point(), Vec2::new(10.0, -3.0));
    }
}
