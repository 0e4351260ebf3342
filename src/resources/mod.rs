//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, configuration and asset
//! stores. Each submodule documents the semantics and intended usage of its
//! resource(s).
//!
//! Overview
//! - `animationstore` – reusable sprite animation definitions
//! - `gameconfig` – window and asset settings loaded from an INI file
//! - `texturestore` – loaded sprite sheets keyed by string IDs
//! - `worldtime` – simulation time, fixed-timestep accumulator and blend alpha
pub mod animationstore;
pub mod gameconfig;
pub mod texturestore;
pub mod worldtime;
