/// SpellingGame: the letter grid plus the local session counters.
///
/// ## States
///   - editing:   keys and paste go to the buffer
///   - loading:   a word check is pending; every input is refused
///   - game over: set by a wrong answer; only `restart()` clears it
///
/// Correctness is never decided here. `begin_submit()` hands out the word
/// and raises `loading`; the caller awaits the check and reports back with
/// `finish_submit()` (or `abort_submit()` if the check itself failed).

use crate::domain::guess::GuessBuffer;
use crate::domain::score::ScoreBoard;
use crate::sim::event::GameEvent;
use crate::sim::session::Command;

/// What an input did to the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpellingAction {
    Ignored,
    Edited,
    /// Enter on a full buffer.
    Submit,
}

#[derive(Clone, Debug)]
pub struct SpellingGame {
    guess: GuessBuffer,
    board: ScoreBoard,
    game_over: bool,
    loading: bool,
    /// Word sent with the last check, kept for the game-over screen.
    last_submitted: String,
}

impl SpellingGame {
    /// Start with `word_length` cells, pre-filled from the parent's
    /// `current_guess` when it is exactly that many letters.
    pub fn new(word_length: usize, level_every: u32, current_guess: &str) -> Self {
        let mut guess = GuessBuffer::new(word_length);
        if current_guess.chars().count() == word_length
            && current_guess.chars().all(|c| c.is_ascii_alphabetic())
        {
            guess.paste(current_guess);
            guess.move_home();
        }
        SpellingGame {
            guess,
            board: ScoreBoard::new(level_every),
            game_over: false,
            loading: false,
            last_submitted: String::new(),
        }
    }

    pub fn guess(&self) -> &GuessBuffer {
        &self.guess
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_submitted(&self) -> &str {
        &self.last_submitted
    }

    /// Submit button state.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.game_over && self.guess.is_complete()
    }

    /// New target word of `word_length` letters.
    pub fn new_round(&mut self, word_length: usize) {
        self.guess.reset(word_length);
    }

    pub fn handle(&mut self, cmd: &Command) -> SpellingAction {
        if self.loading || self.game_over {
            return SpellingAction::Ignored;
        }
        let g = &mut self.guess;
        match cmd {
            Command::Char(c) => {
                if !g.type_char(*c) {
                    return SpellingAction::Ignored;
                }
            }
            Command::Backspace => g.backspace(),
            Command::Delete => g.delete(),
            Command::Left => g.move_left(),
            Command::Right => g.move_right(),
            Command::Home => g.move_home(),
            Command::End => g.move_end(),
            Command::Paste(text) => {
                if g.paste(text) == 0 {
                    return SpellingAction::Ignored;
                }
            }
            Command::Enter => {
                return if self.can_submit() {
                    SpellingAction::Submit
                } else {
                    SpellingAction::Ignored
                };
            }
            _ => return SpellingAction::Ignored,
        }
        log::debug!("guess {:?} focus {}", self.guess.word(), self.guess.focus());
        SpellingAction::Edited
    }

    /// Lock input and hand out the word to check. `None` if submitting
    /// isn't allowed right now.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        self.last_submitted = self.guess.word();
        Some(self.last_submitted.clone())
    }

    /// Apply the check result. The caller fetches the next word on success.
    pub fn finish_submit(&mut self, correct: bool) -> Vec<GameEvent> {
        self.loading = false;
        if correct {
            let mut events = vec![GameEvent::SpellingCorrect];
            if self.board.record_correct() {
                events.push(GameEvent::LevelUp { level: self.board.level });
            }
            self.guess.clear();
            events
        } else {
            self.game_over = true;
            vec![GameEvent::SpellingWrong]
        }
    }

    /// The check never produced an answer: unlock, keep the guess.
    pub fn abort_submit(&mut self) {
        self.loading = false;
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.game_over = false;
        self.loading = false;
        self.last_submitted.clear();
        self.guess.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(s: &SpellingGame) -> String {
        s.guess().cells().iter().map(|c| c.map_or('_', |l| l.as_char())).collect()
    }

    fn type_str(s: &mut SpellingGame, text: &str) {
        for c in text.chars() {
            s.handle(&Command::Char(c));
        }
    }

    fn submit(s: &mut SpellingGame, correct: bool) -> Vec<GameEvent> {
        assert_eq!(s.handle(&Command::Enter), SpellingAction::Submit);
        assert!(s.begin_submit().is_some());
        s.finish_submit(correct)
    }

    #[test]
    fn mirrors_parent_guess_of_matching_length() {
        let s = SpellingGame::new(3, 3, "cab");
        assert_eq!(shown(&s), "CAB");
        assert_eq!(s.guess().focus(), 0);
        let s = SpellingGame::new(4, 3, "cab");
        assert_eq!(shown(&s), "____");
    }

    #[test]
    fn parent_guess_with_non_letters_is_not_mirrored() {
        let s = SpellingGame::new(4, 3, "c-ab");
        assert_eq!(shown(&s), "____");
        let s = SpellingGame::new(3, 3, "a b");
        assert_eq!(shown(&s), "___");
        assert!(!s.guess().is_complete());
    }

    #[test]
    fn non_letter_key_is_ignored() {
        let mut s = SpellingGame::new(3, 3, "");
        assert_eq!(s.handle(&Command::Char('7')), SpellingAction::Ignored);
        assert_eq!(s.handle(&Command::Paste("--".into())), SpellingAction::Ignored);
        assert_eq!(shown(&s), "___");
    }

    #[test]
    fn submit_needs_full_buffer() {
        let mut s = SpellingGame::new(5, 3, "");
        type_str(&mut s, "cat");
        assert!(!s.can_submit());
        assert_eq!(s.handle(&Command::Enter), SpellingAction::Ignored);
        assert_eq!(s.begin_submit(), None);

        // Paste fills index 3 only; index 4 still empty.
        s.handle(&Command::Paste("S".into()));
        assert_eq!(shown(&s), "CATS_");
        assert!(!s.can_submit());

        type_str(&mut s, "y");
        assert!(s.can_submit());
    }

    #[test]
    fn loading_blocks_everything() {
        let mut s = SpellingGame::new(3, 3, "");
        type_str(&mut s, "dog");
        assert_eq!(s.begin_submit().as_deref(), Some("DOG"));
        assert!(s.is_loading());
        assert!(!s.can_submit());
        assert_eq!(s.begin_submit(), None);
        assert_eq!(s.handle(&Command::Backspace), SpellingAction::Ignored);
        assert_eq!(s.handle(&Command::Enter), SpellingAction::Ignored);
        assert_eq!(shown(&s), "DOG");
    }

    #[test]
    fn third_correct_answer_levels_up() {
        let mut s = SpellingGame::new(3, 3, "");
        type_str(&mut s, "one");
        assert_eq!(submit(&mut s, true), vec![GameEvent::SpellingCorrect]);
        type_str(&mut s, "two");
        submit(&mut s, true);
        assert_eq!((s.board().correct, s.board().level), (2, 1));

        type_str(&mut s, "six");
        let events = submit(&mut s, true);
        assert_eq!(events, vec![GameEvent::SpellingCorrect, GameEvent::LevelUp { level: 2 }]);
        assert_eq!((s.board().score, s.board().correct, s.board().level), (3, 3, 2));
        assert_eq!(shown(&s), "___");
        assert_eq!(s.guess().focus(), 0);
        assert!(!s.is_loading());
    }

    #[test]
    fn wrong_answer_freezes_until_restart() {
        let mut s = SpellingGame::new(3, 3, "");
        type_str(&mut s, "cat");
        submit(&mut s, true);
        type_str(&mut s, "dgo");
        assert_eq!(submit(&mut s, false), vec![GameEvent::SpellingWrong]);
        assert!(s.is_game_over());
        assert_eq!(s.last_submitted(), "DGO");
        assert_eq!(s.handle(&Command::Char('a')), SpellingAction::Ignored);
        assert!(!s.can_submit());

        s.restart();
        assert!(!s.is_game_over());
        assert_eq!((s.board().score, s.board().correct, s.board().level), (0, 0, 1));
        assert_eq!(shown(&s), "___");
        assert_eq!(s.handle(&Command::Char('a')), SpellingAction::Edited);
    }

    #[test]
    fn abort_keeps_guess() {
        let mut s = SpellingGame::new(2, 3, "");
        type_str(&mut s, "ox");
        s.begin_submit();
        s.abort_submit();
        assert!(!s.is_loading());
        assert!(!s.is_game_over());
        assert!(s.can_submit());
    }

    #[test]
    fn new_round_resizes() {
        let mut s = SpellingGame::new(3, 3, "");
        type_str(&mut s, "ab");
        s.new_round(7);
        assert_eq!(shown(&s), "_______");
    }
}
