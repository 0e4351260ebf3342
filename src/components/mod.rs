//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world.
//!
//! Submodules overview:
//! - [`animation`] – keyframe sequencing, interpolation and render sampling
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`signals`] – per-entity flag storage for cross-system communication
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod mapposition;
pub mod signals;
pub mod zindex;
