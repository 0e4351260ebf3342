//! Animation advance system.
//!
//! Runs once per fixed simulation tick and advances every
//! [`Animation`](crate::components::animation::Animation) component by
//! [`TIMESTEP_MS`](crate::resources::worldtime::TIMESTEP_MS). Entities that
//! also carry [`Signals`](crate::components::signals::Signals) get the
//! `"animation_ended"` flag raised on the tick their sequence finishes a
//! loop and cleared again on every other tick.
//!
//! Rendering is not touched here; the render pass samples the components
//! with the current blend alpha (see [`crate::systems::render`]).

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::signals::Signals;

/// Advance animation playback one fixed tick.
///
/// Contract
/// - Must be scheduled exactly once per fixed simulation tick.
/// - Mutates [`Animation`] playback state.
/// - Optionally writes the `"animation_ended"` flag on [`Signals`].
pub fn animation(mut query: Query<(&mut Animation, Option<&mut Signals>)>) {
    for (mut animation, mut signals) in query.iter_mut() {
        let ended = animation.update();
        if let Some(signals) = signals.as_mut() {
            if ended {
                signals.set_flag("animation_ended");
            } else {
                signals.clear_flag("animation_ended");
            }
        }
    }
}
