//! Search progress reporting.
//!
//! A long search on a large grid can report how much of its corridor it has
//! explored. Any `FnMut(f32)` closure is a [`SearchProgress`]:
//!
//! ```rust,ignore
//! let mut last = 0.0;
//! planner.find_path_with_progress(start, goal, &mut |f: f32| last = f);
//! ```

/// Receives the explored fraction of the search corridor, in `[0, 1]`.
pub trait SearchProgress {
    /// Called periodically during the search and once with `1.0` on success.
    fn report(&mut self, fraction: f32);

    /// False if reports are discarded, letting the planner skip the corridor
    /// size computation.
    fn is_active(&self) -> bool {
        true
    }
}

impl<F: FnMut(f32)> SearchProgress for F {
    fn report(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Progress sink that ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl SearchProgress for NoProgress {
    fn report(&mut self, _fraction: f32) {}

    fn is_active(&self) -> bool {
        false
    }
}

/// Maps one leg's `[0, 1]` progress into its slice of a multi-leg route.
pub(crate) struct LegProgress<'p, P: SearchProgress + ?Sized> {
    inner: &'p mut P,
    leg: usize,
    legs: usize,
}

impl<'p, P: SearchProgress + ?Sized> LegProgress<'p, P> {
    pub(crate) fn new(inner: &'p mut P, leg: usize, legs: usize) -> Self {
        Self {
            inner,
            leg,
            legs: legs.max(1),
        }
    }
}

impl<P: SearchProgress + ?Sized> SearchProgress for LegProgress<'_, P> {
    fn report(&mut self, fraction: f32) {
        self.inner
            .report((self.leg as f32 + fraction) / self.legs as f32);
    }

    fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(progress: &mut impl SearchProgress) {
        progress.report(0.25);
        progress.report(1.0);
    }

    #[test]
    fn test_closure_progress() {
        let mut seen = Vec::new();
        drive(&mut |f: f32| seen.push(f));
        assert_eq!(seen, vec![0.25, 1.0]);
    }

    #[test]
    fn test_no_progress_inactive() {
        let mut sink = NoProgress;
        assert!(!sink.is_active());
        drive(&mut sink);
    }

    #[test]
    fn test_leg_progress_scaling() {
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        drive(&mut LegProgress::new(&mut sink, 1, 4));
        assert_eq!(seen, vec![0.3125, 0.5]);

        let mut quiet = NoProgress;
        assert!(!LegProgress::new(&mut quiet, 0, 2).is_active());
    }
}
