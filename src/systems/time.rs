//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta. The
//! main loop then drains whole fixed ticks with
//! [`WorldTime::consume_tick`](crate::resources::worldtime::WorldTime::consume_tick)
//! and renders with
//! [`WorldTime::alpha`](crate::resources::worldtime::WorldTime::alpha).
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Fold the unscaled frame delta (seconds) into the `WorldTime` resource.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().push_frame(dt);
}
