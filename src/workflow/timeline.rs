const LINE_BASE_HEIGHT: f64 = 24.0;
const LINE_STEP_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Hidden,
    Active,
    Completed,
}

/// Steps are numbered from 1. Only the active step can reveal the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTimeline {
    current: usize,
    total: usize,
}

impl WorkflowTimeline {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns whether clicking `step` revealed anything.
    pub fn reveal_after(&mut self, step: usize) -> bool {
        if step != self.current || step >= self.total {
            return false;
        }

        self.current = step + 1;
        true
    }

    pub fn step_state(&self, step: usize) -> StepState {
        if step < self.current {
            StepState::Completed
        } else if step == self.current {
            StepState::Active
        } else {
            StepState::Hidden
        }
    }

    pub fn can_reveal_after(&self, step: usize) -> bool {
        step == self.current && step < self.total
    }

    /// Height in pixels of the progress line drawn along the steps.
    #[expect(clippy::cast_precision_loss)]
    pub fn progress_height(&self) -> f64 {
        let span = (self.total - 1).max(1) as f64;
        let fraction = (self.current - 1) as f64 / span;
        let max_height = LINE_BASE_HEIGHT + (self.total - 1) as f64 * LINE_STEP_HEIGHT;

        LINE_BASE_HEIGHT + fraction * (max_height - LINE_BASE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_step() {
        let timeline = WorkflowTimeline::new(4);

        assert_eq!(timeline.current(), 1);
        assert_eq!(timeline.step_state(1), StepState::Active);
        assert_eq!(timeline.step_state(2), StepState::Hidden);
        assert!((timeline.progress_height() - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_active_step_reveals() {
        let mut timeline = WorkflowTimeline::new(4);

        assert!(!timeline.reveal_after(2));
        assert!(timeline.reveal_after(1));
        assert!(!timeline.reveal_after(1));
        assert_eq!(timeline.current(), 2);
        assert_eq!(timeline.step_state(1), StepState::Completed);
        assert_eq!(timeline.step_state(2), StepState::Active);
    }

    #[test]
    fn last_step_reveals_nothing() {
        let mut timeline = WorkflowTimeline::new(3);

        assert!(timeline.reveal_after(1));
        assert!(timeline.reveal_after(2));
        assert!(!timeline.can_reveal_after(3));
        assert!(!timeline.reveal_after(3));
        assert_eq!(timeline.current(), 3);
        // 24 + (3 - 1) * 60
        assert!((timeline.progress_height() - 144.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_proportional() {
        let mut timeline = WorkflowTimeline::new(5);
        timeline.reveal_after(1);
        timeline.reveal_after(2);

        // fraction 2/4 of a 24..264 line
        assert!((timeline.progress_height() - 144.0).abs() < 1e-9);
    }

    #[test]
    fn single_step() {
        let mut timeline = WorkflowTimeline::new(1);

        assert!(!timeline.reveal_after(1));
        assert!((timeline.progress_height() - 24.0).abs() < f64::EPSILON);
    }
}
