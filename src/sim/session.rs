/// SessionState: everything the screen shows, owned in one place.
///
/// The session is the parent of the components: it owns the canonical word
/// length and current guess; `SpellingGame` edits its own copy and the flow
/// writes the result back into `current_guess` after every change.

use crate::api::{ApiStatus, Round};
use crate::domain::marks::{self, LetterMark};
use crate::sim::length::LengthGuesser;
use crate::sim::spelling::SpellingGame;

/// Input, already decoded from the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Paste(String),
    GiveUp,
    ToggleHelp,
    ToggleAbout,
    Back,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    LengthGuess,
    Spelling,
    GameOver,
}

/// Panels opened from the navigation bar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Overlay {
    Help,
    About,
}

/// An answer shown next to the guess it beat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub answer: String,
    pub guess: String,
    pub marks: Vec<LetterMark>,
}

impl Reveal {
    pub fn new(answer: String, guess: String) -> Self {
        let marks = marks::grade(&guess, &answer);
        Reveal { answer, guess, marks }
    }
}

pub struct SessionState {
    pub phase: Phase,
    pub overlay: Option<Overlay>,
    pub api_status: ApiStatus,
    pub round: Option<Round>,
    /// Canonical target length, set once the length guess is right.
    pub word_length: usize,
    /// Canonical guess text, mirrored from the spelling grid.
    pub current_guess: String,
    pub length: LengthGuesser,
    pub spelling: SpellingGame,
    pub reveal: Option<Reveal>,
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
}

impl SessionState {
    pub fn new(api_status: ApiStatus, level_every: u32) -> Self {
        SessionState {
            phase: Phase::LengthGuess,
            overlay: None,
            api_status,
            round: None,
            word_length: 0,
            current_guess: String::new(),
            length: LengthGuesser::default(),
            spelling: SpellingGame::new(0, level_every, ""),
            reveal: None,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        }
    }

    /// Show a message in the bottom bar. `ticks == 0` keeps it until replaced.
    pub fn set_message(&mut self, text: &str, ticks: u32) {
        self.message = text.to_string();
        self.message_timer = ticks;
    }

    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }

    /// Copy the grid's text back into the canonical guess.
    pub fn sync_guess(&mut self) {
        self.current_guess = self.spelling.guess().word();
    }

    pub fn toggle_overlay(&mut self, which: Overlay) {
        self.overlay = if self.overlay == Some(which) { None } else { Some(which) };
    }
}
