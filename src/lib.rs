//! Flipbook library.
//!
//! Sprite-sheet keyframe animation for a 2D game client: fixed-timestep
//! playback with interpolated frame index, opacity and scale, exposed as ECS
//! components, resources and systems plus the generic
//! [`interpolated`] primitive they are built on.

pub mod components;
pub mod interpolated;
pub mod resources;
pub mod systems;
