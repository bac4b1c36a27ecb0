/// Game-state / word API seen by the session.
///
/// The session never picks or checks words itself: it asks for a round,
/// forwards the length guess and the spelled word, and renders whatever
/// comes back. `local::LocalWordService` is the built-in implementation.

pub mod local;
pub mod words;

use std::fmt;

use crate::error::Result;

/// Backend reachability, shown in the navigation bar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ApiStatus {
    Connected,
    Disconnected,
}

impl ApiStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiStatus::Connected => "connected",
            ApiStatus::Disconnected => "disconnected",
        }
    }

    pub fn is_connected(self) -> bool {
        self == ApiStatus::Connected
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the player is told about the current word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub word_length: usize,
    pub clue: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthFeedback {
    pub correct: bool,
    pub message: String,
}

pub trait GameApi {
    fn status(&self) -> ApiStatus;

    /// Pick a new target word. The previous one is forgotten.
    fn fetch_next_word(&mut self) -> Result<Round>;

    /// Choices offered for the length-guessing prompt of the current round.
    fn length_options(&self) -> Vec<usize>;

    fn guess_length(&mut self, guess: usize) -> Result<LengthFeedback>;

    /// Does `word` spell the current target?
    async fn submit_spelling(&mut self, word: &str) -> Result<bool>;

    fn reveal_answer(&mut self) -> Result<String>;
}
