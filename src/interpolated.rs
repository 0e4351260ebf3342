//! Time-interpolated values.
//!
//! The simulation advances in fixed steps while rendering happens at whatever
//! rate the machine manages. [`Interpolated`] holds a value as of the last
//! completed step (`committed`) together with the value currently being
//! transitioned to (`pending`), so the renderer can blend between the two
//! with a `[0, 1]` factor instead of snapping once per step.
//!
//! One generic type serves every animated property: opacity and scale use
//! `Interpolated<f32>`, the frame index uses `Interpolated<i16>` (its [`Lerp`]
//! impl rounds, so the blend already yields a usable discrete index).

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    /// Blend between `a` and `b` by `t` in `[0, 1]`.
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

/// Discrete consumer: blends in float space and rounds to the nearest value.
impl Lerp for i16 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        (a as f32 + (b - a) as f32 * t).round() as i16
    }
}

/// A value with committed/pending states and linear blending between them.
///
/// Invariant: `get(0.0) == committed` and `get(1.0) == pending`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated<T: Lerp> {
    committed: T,
    pending: T,
}

impl<T: Lerp> Interpolated<T> {
    /// Create with both states equal to `value`.
    pub fn new(value: T) -> Self {
        Self {
            committed: value,
            pending: value,
        }
    }

    /// Value blended between the last completed step and the current target.
    pub fn get(&self, alpha: f32) -> T {
        T::lerp(self.committed, self.pending, alpha)
    }

    /// Value as of the last completed simulation step.
    pub fn committed(&self) -> T {
        self.committed
    }

    /// Value being transitioned to.
    pub fn pending(&self) -> T {
        self.pending
    }

    /// Begin transitioning to `target`.
    ///
    /// The previous target becomes the committed value. A `threshold` above
    /// zero additionally promotes the committed value toward the new target
    /// by that fraction, absorbing the part of the step that has already
    /// elapsed so the next render at `alpha = 0` does not snap backward.
    pub fn retarget(&mut self, target: T, threshold: f32) {
        self.committed = self.pending;
        self.pending = target;
        if threshold > 0.0 {
            self.committed = self.get(threshold);
        }
    }

    /// Collapse the in-flight transition into the committed value.
    pub fn commit(&mut self) {
        self.committed = self.pending;
    }

    /// Set both states at once, discarding any in-flight transition.
    pub fn force_set(&mut self, value: T) {
        self.committed = value;
        self.pending = value;
    }
}

impl<T: Lerp + std::ops::Add<Output = T>> Interpolated<T> {
    /// Step the target by `delta`, committing the previous target so that
    /// renders keep blending across the step.
    pub fn shift(&mut self, delta: T) {
        self.committed = self.pending;
        self.pending = self.pending + delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== BLEND ENDPOINT TESTS ====================

    #[test]
    fn test_new_starts_with_equal_states() {
        let q = Interpolated::new(4.0f32);
        assert!(approx_eq(q.committed(), 4.0));
        assert!(approx_eq(q.pending(), 4.0));
        assert!(approx_eq(q.get(0.5), 4.0));
    }

    #[test]
    fn test_blend_endpoints_f32() {
        let mut q = Interpolated::new(10.0f32);
        q.retarget(20.0, 0.0);
        assert!(approx_eq(q.get(0.0), q.committed()));
        assert!(approx_eq(q.get(1.0), q.pending()));
    }

    #[test]
    fn test_blend_midpoint_f32() {
        let mut q = Interpolated::new(10.0f32);
        q.retarget(20.0, 0.0);
        assert!(approx_eq(q.get(0.5), 15.0));
    }

    #[test]
    fn test_blend_endpoints_i16() {
        let mut q = Interpolated::new(0i16);
        q.retarget(2, 0.0);
        assert_eq!(q.get(0.0), q.committed());
        assert_eq!(q.get(1.0), q.pending());
    }

    #[test]
    fn test_i16_blend_rounds_to_nearest() {
        let mut q = Interpolated::new(0i16);
        q.retarget(1, 0.0);
        assert_eq!(q.get(0.4), 0);
        assert_eq!(q.get(0.6), 1);
    }

    // ==================== RETARGET TESTS ====================

    #[test]
    fn test_retarget_commits_previous_target() {
        let mut q = Interpolated::new(0.0f32);
        q.retarget(10.0, 0.0);
        q.retarget(30.0, 0.0);
        // the first target (10.0) must have been realized before starting
        // the second transition
        assert!(approx_eq(q.committed(), 10.0));
        assert!(approx_eq(q.pending(), 30.0));
    }

    #[test]
    fn test_retarget_threshold_promotes_committed() {
        let mut q = Interpolated::new(0.0f32);
        q.retarget(10.0, 0.25);
        assert!(approx_eq(q.committed(), 2.5));
        assert!(approx_eq(q.pending(), 10.0));
    }

    #[test]
    fn test_retarget_zero_threshold_leaves_committed() {
        let mut q = Interpolated::new(5.0f32);
        q.retarget(9.0, 0.0);
        assert!(approx_eq(q.committed(), 5.0));
    }

    #[test]
    fn test_retarget_threshold_rounds_for_i16() {
        let mut a = Interpolated::new(0i16);
        a.retarget(1, 0.3);
        assert_eq!(a.committed(), 0);

        let mut b = Interpolated::new(0i16);
        b.retarget(1, 0.6);
        assert_eq!(b.committed(), 1);
    }

    // ==================== COMMIT / FORCE_SET TESTS ====================

    #[test]
    fn test_commit_collapses_transition() {
        let mut q = Interpolated::new(1.0f32);
        q.retarget(2.0, 0.0);
        q.commit();
        assert!(approx_eq(q.committed(), 2.0));
        assert!(approx_eq(q.get(0.0), q.get(1.0)));
    }

    #[test]
    fn test_force_set_discards_transition() {
        let mut q = Interpolated::new(1.0f32);
        q.retarget(2.0, 0.5);
        q.force_set(7.0);
        assert!(approx_eq(q.committed(), 7.0));
        assert!(approx_eq(q.pending(), 7.0));
    }

    // ==================== SHIFT TESTS ====================

    #[test]
    fn test_shift_steps_target_and_commits() {
        let mut q = Interpolated::new(100.0f32);
        q.shift(-10.0);
        assert!(approx_eq(q.committed(), 100.0));
        assert!(approx_eq(q.pending(), 90.0));

        q.shift(-10.0);
        assert!(approx_eq(q.committed(), 90.0));
        assert!(approx_eq(q.pending(), 80.0));
    }

    #[test]
    fn test_shift_blends_across_step() {
        let mut q = Interpolated::new(0.0f32);
        q.shift(50.0);
        assert!(approx_eq(q.get(0.5), 25.0));
    }
}
