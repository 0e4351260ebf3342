//! Draw-order component.

use bevy_ecs::prelude::Component;

/// Painter's-algorithm sort key: higher values draw on top.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ZIndex(pub i32);
