// Signals for communication between systems observing the same entity

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashSet;

/// Per-entity flag storage.
///
/// The animation system raises `"animation_ended"` here on the tick a
/// sequence finishes a loop; gameplay systems poll and react without being
/// coupled to the animation component itself.
#[derive(Debug, Clone, Component, Default)]
pub struct Signals {
    flags: FxHashSet<String>,
}

impl Signals {
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: impl Into<String>) {
        self.flags.remove(&key.into());
    }
    pub fn has_flag(&self, key: impl Into<String>) -> bool {
        self.flags.contains(&key.into())
    }
    pub fn flags(&self) -> &FxHashSet<String> {
        &self.flags
    }
}
