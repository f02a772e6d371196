/// Position within the quiz, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn new(current_index: usize, total: usize, answered: usize) -> Self {
        Self {
            position: current_index + 1,
            total,
            answered,
        }
    }

    /// `(current_index + 1) / total`, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.position as f64 / self.total as f64;
        fraction.min(1.0)
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}
