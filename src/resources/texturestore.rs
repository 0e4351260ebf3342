//! Texture registry.
//!
//! Loaded sprite sheets keyed by string IDs. Keyframes reference textures by
//! key only, so animation data stays decoupled from GPU resources; an entity
//! whose key is missing here simply does not draw.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TextureStore {
            map: FxHashMap::default(),
        }
    }

    /// Get a texture by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    /// Insert a texture with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    /// Load a texture from disk and register it under `key`.
    pub fn load_file(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: impl Into<String>,
        path: &str,
    ) -> Result<(), String> {
        let texture = rl
            .load_texture(thread, path)
            .map_err(|e| format!("failed to load texture {}: {}", path, e))?;
        self.insert(key, texture);
        Ok(())
    }

    /// Clear all loaded textures.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
