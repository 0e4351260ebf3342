//! Animation resource registry.
//!
//! This module provides a store for animation definitions that can be reused
//! by multiple entities. Definitions are prototypes: look one up by key and
//! clone it to obtain an instance with fresh playback state. The keyframe
//! data behind each definition is shared read-only between all clones.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::path::Path;

use crate::components::animation::Animation;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Animation>,
}

impl AnimationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        AnimationStore {
            animations: FxHashMap::default(),
        }
    }

    /// Get an animation prototype by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Animation> {
        self.animations.get(key.as_ref())
    }

    /// Insert an animation with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, animation: Animation) {
        self.animations.insert(key.into(), animation);
    }

    /// Clear all loaded animations.
    pub fn clear(&mut self) {
        self.animations.clear();
    }

    /// Parse a JSON object of named animation definitions.
    ///
    /// Individual records that turn out malformed degrade to the degenerate
    /// static animation (with a warning) rather than failing the load;
    /// returns the number of definitions read.
    pub fn load_str(&mut self, text: &str) -> Result<usize, String> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| format!("invalid animation data: {}", e))?;
        let map = root
            .as_object()
            .ok_or_else(|| "animation data must be a JSON object of named definitions".to_string())?;

        let mut count = 0;
        for (name, node) in map {
            self.animations
                .insert(name.clone(), Animation::from_value(node));
            count += 1;
        }
        Ok(count)
    }

    /// Load animation definitions from a JSON file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let count = self.load_str(&text)?;
        info!("Loaded {} animation(s) from {}", count, path.display());
        Ok(count)
    }
}
