/// GuessBuffer: the per-cell letter grid being edited.
///
/// ## Invariants
///   - `cells.len()` equals the target word length for the whole round.
///     Only `reset()` changes it.
///   - Every cell is `None` or one `Letter` (uppercase A-Z).
///   - `focus < cells.len()` whenever the buffer is non-empty.
///
/// All edits are index based and never grow or shrink the buffer, so the
/// grid always renders exactly N cells.

use super::letter::{self, Letter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessBuffer {
    cells: Vec<Option<Letter>>,
    focus: usize,
}

impl GuessBuffer {
    pub fn new(len: usize) -> Self {
        GuessBuffer { cells: vec![None; len], focus: 0 }
    }

    /// Rebuild with `len` empty cells and focus on the first.
    pub fn reset(&mut self, len: usize) {
        self.cells.clear();
        self.cells.resize(len, None);
        self.focus = 0;
    }

    /// Clear every cell, keeping the length.
    pub fn clear(&mut self) {
        let len = self.cells.len();
        self.reset(len);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Option<Letter>] {
        &self.cells
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_complete(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(Option::is_some)
    }

    /// The guess as typed so far; empty cells are skipped.
    pub fn word(&self) -> String {
        self.cells.iter().flatten().map(|l| l.as_char()).collect()
    }

    fn last(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    // ── Editing ──

    /// Type `c` into the active cell. Returns false (and changes nothing)
    /// for anything that isn't a letter.
    pub fn type_char(&mut self, c: char) -> bool {
        let Some(l) = Letter::from_char(c) else { return false };
        if self.cells.is_empty() {
            return false;
        }
        self.cells[self.focus] = Some(l);

        // Next empty cell to the right; otherwise step one right.
        self.focus = self.cells[self.focus + 1..]
            .iter()
            .position(Option::is_none)
            .map(|off| self.focus + 1 + off)
            .unwrap_or_else(|| (self.focus + 1).min(self.last()));
        true
    }

    /// Clear the active cell, or step back and clear the previous one.
    pub fn backspace(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        if self.cells[self.focus].is_some() {
            self.cells[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
            self.cells[self.focus] = None;
        }
    }

    pub fn delete(&mut self) {
        if let Some(cell) = self.cells.get_mut(self.focus) {
            *cell = None;
        }
    }

    pub fn move_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.focus = (self.focus + 1).min(self.last());
    }

    pub fn move_home(&mut self) {
        self.focus = 0;
    }

    pub fn move_end(&mut self) {
        self.focus = self.last();
    }

    /// Fill from the active cell rightward with the letters of `text`.
    /// Returns how many cells were written (0 = nothing usable in `text`).
    pub fn paste(&mut self, text: &str) -> usize {
        let letters = letter::sanitize(text);
        let room = self.cells.len().saturating_sub(self.focus);
        let take = letters.len().min(room);
        if take == 0 {
            return 0;
        }
        let start = self.focus;
        for (i, l) in letters.into_iter().take(take).enumerate() {
            self.cells[start + i] = Some(l);
        }
        self.focus = (start + take).min(self.last());
        take
    }
}
