/// Number of steps every pipeline run walks through.
pub const STEP_COUNT: usize = 5;

/// One discrete stage of the visual progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub done: bool,
}

/// Step-wise completion state plus the derived progress bar width.
///
/// A run installs a fresh tracker before it marks its first step.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    steps: Vec<Step>,
    percent: f64,
}

impl ProgressTracker {
    pub fn new(count: usize) -> Self {
        Self {
            steps: (0..count).map(|index| Step { index, done: false }).collect(),
            percent: 0.0,
        }
    }

    /// Flags the step at `index` complete and moves the bar to
    /// `(index + 1) / N`. Marking a completed step again only reasserts it.
    pub fn mark_step_done(&mut self, index: usize) {
        let total = self.steps.len();
        let Some(step) = self.steps.get_mut(index) else {
            tracing::warn!(index, total, "ignoring unknown progress step");
            return;
        };
        step.done = true;
        self.percent = (index + 1) as f64 / total as f64 * 100.0;
        tracing::debug!(index, percent = self.percent, "step done");
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|step| step.done).count()
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// CSS-style width of the progress bar, e.g. `"60%"`.
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percent)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(STEP_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_follows_marked_index() {
        let mut tracker = ProgressTracker::new(5);
        let mut last = tracker.percent();
        for k in 0..5 {
            tracker.mark_step_done(k);
            let expected = (k + 1) as f64 / 5.0 * 100.0;
            assert!((tracker.percent() - expected).abs() < 1e-9);
            assert!(tracker.percent() >= last);
            last = tracker.percent();
        }
        assert_eq!(tracker.completed(), 5);
        assert_eq!(tracker.bar_width(), "100%");
    }

    #[test]
    fn remarking_is_idempotent() {
        let mut tracker = ProgressTracker::new(4);
        tracker.mark_step_done(0);
        tracker.mark_step_done(1);
        tracker.mark_step_done(1);
        assert_eq!(tracker.completed(), 2);
        assert_eq!(tracker.bar_width(), "50%");
    }

    #[test]
    fn default_tracker_is_a_fresh_run() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker, ProgressTracker::new(STEP_COUNT));
        assert!(tracker.steps().iter().all(|step| !step.done));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut tracker = ProgressTracker::new(2);
        tracker.mark_step_done(7);
        assert_eq!(tracker.completed(), 0);
        assert_eq!(tracker.percent(), 0.0);
    }
}
