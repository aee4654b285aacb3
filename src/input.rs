//! Input actions, bindings and the per-frame action snapshot.
//!
//! Modules never read keyboard state directly. A system rebuilds the
//! [`ActionState`] resource once per frame from `ButtonInput<KeyCode>` and
//! the current [`InputBindings`], so every module samples one consistent
//! snapshot with per-action down/pressed/released queries.

use bevy::log::warn;
use bevy::prelude::*;

/// Abstract input actions the locomotion modules consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// All actions, in snapshot order.
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];

    fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Jump => 2,
        }
    }
}

/// Key pair satisfying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Primary key for the action.
    pub primary: KeyCode,
    /// Optional alternate key; either key satisfies the action.
    pub alternate: Option<KeyCode>,
}

impl Binding {
    /// Create a binding with a primary key only.
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            alternate: None,
        }
    }

    /// Create a binding with a primary and an alternate key.
    pub fn with_alternate(primary: KeyCode, alternate: KeyCode) -> Self {
        Self {
            primary,
            alternate: Some(alternate),
        }
    }
}

/// Remappable action-to-key bindings.
///
/// Defaults: A/D plus the arrow keys for movement, Space with W as
/// alternate for jumping.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InputBindings {
    move_left: Binding,
    move_right: Binding,
    jump: Binding,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            move_left: Binding::with_alternate(KeyCode::KeyA, KeyCode::ArrowLeft),
            move_right: Binding::with_alternate(KeyCode::KeyD, KeyCode::ArrowRight),
            jump: Binding::with_alternate(KeyCode::Space, KeyCode::KeyW),
        }
    }
}

impl InputBindings {
    /// Get the binding for an action.
    pub fn binding(&self, action: Action) -> Binding {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
        }
    }

    /// Remap an action identified by name to a new key.
    ///
    /// Recognized identifiers are `move_left`, `move_right` and `jump`,
    /// plus their `_alt` variants for the alternate key (case
    /// insensitive). An unknown identifier is reported as a warning and
    /// leaves every binding unchanged.
    pub fn remap(&mut self, action: &str, key: KeyCode) {
        match action.to_ascii_lowercase().as_str() {
            "move_left" => self.move_left.primary = key,
            "move_right" => self.move_right.primary = key,
            "jump" => self.jump.primary = key,
            "move_left_alt" => self.move_left.alternate = Some(key),
            "move_right_alt" => self.move_right.alternate = Some(key),
            "jump_alt" => self.jump.alternate = Some(key),
            unknown => {
                warn!("unknown input action '{unknown}', bindings unchanged");
            }
        }
    }

    /// Restore the default bindings.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Per-frame action snapshot with edge detection.
///
/// Rebuilt once per frame by [`update_action_state`]; `just_pressed` /
/// `just_released` are edges of the combined primary-or-alternate down
/// state, so switching between a held primary and its alternate does not
/// produce spurious edges.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionState {
    states: [ButtonState; Action::ALL.len()],
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    down: bool,
    just_pressed: bool,
    just_released: bool,
}

impl ActionState {
    /// Check if the action is currently held.
    pub fn is_down(&self, action: Action) -> bool {
        self.states[action.index()].down
    }

    /// Check if the action went down this frame.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.states[action.index()].just_pressed
    }

    /// Check if the action went up this frame.
    pub fn just_released(&self, action: Action) -> bool {
        self.states[action.index()].just_released
    }

    /// Record the action's current down state, deriving edges from the
    /// previous frame.
    pub fn apply(&mut self, action: Action, down: bool) {
        let state = &mut self.states[action.index()];
        state.just_pressed = down && !state.down;
        state.just_released = !down && state.down;
        state.down = down;
    }
}

/// Rebuild the [`ActionState`] snapshot from raw key state.
pub fn update_action_state(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    mut actions: ResMut<ActionState>,
) {
    for action in Action::ALL {
        let binding = bindings.binding(action);
        let down = keys.pressed(binding.primary)
            || binding.alternate.is_some_and(|key| keys.pressed(key));
        actions.apply(action, down);
    }
}
