/// LengthGuesser: the "How many letters?" prompt.
///
/// Holds only what it displays: the options handed out by the API, which
/// one is highlighted, and the last feedback. Judging a guess is the API's
/// job.

use crate::api::LengthFeedback;

#[derive(Clone, Debug, Default)]
pub struct LengthGuesser {
    options: Vec<usize>,
    cursor: usize,
    feedback: Option<LengthFeedback>,
}

impl LengthGuesser {
    /// New option set for a new round: cursor home, feedback cleared.
    pub fn set_options(&mut self, options: Vec<usize>) {
        self.options = options;
        self.cursor = 0;
        self.feedback = None;
    }

    pub fn options(&self) -> &[usize] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn feedback(&self) -> Option<&LengthFeedback> {
        self.feedback.as_ref()
    }

    pub fn set_feedback(&mut self, feedback: LengthFeedback) {
        self.feedback = Some(feedback);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    /// Value under the cursor.
    pub fn selected(&self) -> Option<usize> {
        self.options.get(self.cursor).copied()
    }

    /// Select by 1-based position (digit keys). Returns the option value.
    pub fn pick_position(&mut self, pos: usize) -> Option<usize> {
        let idx = pos.checked_sub(1)?;
        let value = *self.options.get(idx)?;
        self.cursor = idx;
        Some(value)
    }
}
