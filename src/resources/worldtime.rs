//! Simulation clock and fixed timestep.
//!
//! Real frame deltas are folded into a millisecond accumulator; the main loop
//! drains the accumulator in whole [`TIMESTEP_MS`] ticks and renders with the
//! leftover fraction as the blend factor. See
//! [`crate::systems::time::update_world_time`].

use bevy_ecs::prelude::Resource;

/// Milliseconds of simulation advanced by one fixed tick.
pub const TIMESTEP_MS: u16 = 8;

/// Longest stretch of real time folded into the accumulator in one frame.
/// Keeps a stall (window drag, debugger pause) from unleashing a tick
/// avalanche when the loop resumes.
const MAX_ACCUMULATED_MS: f32 = 200.0;

#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Total scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled seconds of the last frame.
    pub delta: f32,
    /// Multiplier applied to incoming frame deltas.
    pub time_scale: f32,
    accumulator_ms: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            accumulator_ms: 0.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Fold a real frame delta (seconds) into the clock.
    pub fn push_frame(&mut self, dt: f32) {
        let scaled = dt * self.time_scale;
        self.delta = scaled;
        self.elapsed += scaled;
        self.accumulator_ms = (self.accumulator_ms + scaled * 1000.0).min(MAX_ACCUMULATED_MS);
    }

    /// Take one fixed tick out of the accumulator, if one is available.
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator_ms >= TIMESTEP_MS as f32 {
            self.accumulator_ms -= TIMESTEP_MS as f32;
            true
        } else {
            false
        }
    }

    /// Fractional position inside the current tick, for render blending.
    pub fn alpha(&self) -> f32 {
        (self.accumulator_ms / TIMESTEP_MS as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_push_frame_accumulates_scaled_time() {
        let mut wt = WorldTime::default().with_time_scale(2.0);
        wt.push_frame(0.01);
        assert!(approx_eq(wt.delta, 0.02));
        assert!(approx_eq(wt.elapsed, 0.02));
    }

    #[test]
    fn test_consume_tick_drains_whole_steps() {
        let mut wt = WorldTime::default();
        wt.push_frame(0.020); // 20 ms -> two 8 ms ticks + 4 ms left
        assert!(wt.consume_tick());
        assert!(wt.consume_tick());
        assert!(!wt.consume_tick());
        assert!(approx_eq(wt.alpha(), 4.0 / 8.0));
    }

    #[test]
    fn test_alpha_stays_in_unit_range() {
        let mut wt = WorldTime::default();
        assert!(approx_eq(wt.alpha(), 0.0));
        wt.push_frame(10.0); // absurd frame, capped
        assert!(wt.alpha() <= 1.0);
    }

    #[test]
    fn test_accumulator_is_capped() {
        let mut wt = WorldTime::default();
        wt.push_frame(10.0);
        let mut ticks = 0;
        while wt.consume_tick() {
            ticks += 1;
        }
        assert_eq!(ticks, (MAX_ACCUMULATED_MS / TIMESTEP_MS as f32) as i32);
    }
}
