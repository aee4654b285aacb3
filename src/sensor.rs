//! Tag-filtered contact sensors.
//!
//! A sensor is a binary contact detector bound to a surface tag. The
//! physics integrator's contact-begin/contact-end notifications toggle it;
//! querying is side effect free. Overlapping contacts of the same tag are
//! tracked per source entity, so the reported state saturates: `touching`
//! is true while at least one contact persists, and duplicate begin/end
//! pairs from the same source are idempotent.

use std::collections::HashSet;

use bevy::prelude::*;

/// Surface tag carried by level geometry, matched against sensor filters.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SurfaceTag(String);

impl SurfaceTag {
    /// Tag for walkable ground surfaces.
    pub const GROUND: &'static str = "ground";
    /// Tag for blocking wall surfaces.
    pub const WALL: &'static str = "wall";

    /// Create a surface tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Binary contact detector bound to a tag filter.
#[derive(Component, Debug, Clone)]
pub struct ContactSensor {
    filter: String,
    active: HashSet<Entity>,
}

impl ContactSensor {
    /// Create a sensor reacting to contacts tagged `filter`.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            active: HashSet::new(),
        }
    }

    /// The tag this sensor reacts to.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether at least one matching contact is active.
    pub fn touching(&self) -> bool {
        !self.active.is_empty()
    }

    /// Contact-begin notification from the integrator.
    ///
    /// Ignored unless `tag` matches the filter.
    pub fn on_contact_begin(&mut self, source: Entity, tag: &str) {
        if tag == self.filter {
            self.active.insert(source);
        }
    }

    /// Contact-end notification from the integrator.
    ///
    /// Ignored unless `tag` matches the filter.
    pub fn on_contact_end(&mut self, source: Entity, tag: &str) {
        if tag == self.filter {
            self.active.remove(&source);
        }
    }
}
