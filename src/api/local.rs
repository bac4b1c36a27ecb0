/// Offline word service: plays the backend's role from an in-memory list.
///
/// Words come from `config.toml`'s `words_file` when set, the built-in list
/// otherwise. Selection and length distractors use a seeded xoshiro RNG so
/// tests can pin the sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::words::{self, WordEntry};
use super::{ApiStatus, GameApi, LengthFeedback, Round};
use crate::config::{GameConfig, GameSettings};
use crate::error::{AppError, Result};

pub struct LocalWordService {
    words: Vec<WordEntry>,
    settings: GameSettings,
    rng: Xoshiro256PlusPlus,
    current: Option<usize>,
    options: Vec<usize>,
}

impl LocalWordService {
    pub fn new(words: Vec<WordEntry>, settings: GameSettings, seed: u64) -> Self {
        LocalWordService {
            words,
            settings,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            current: None,
            options: Vec::new(),
        }
    }

    /// Build from config. A broken word file falls back to the built-in list;
    /// the error is returned alongside so the caller can report it.
    pub fn from_config(config: &GameConfig) -> (Self, Option<AppError>) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);

        let (list, err) = match &config.words_file {
            Some(path) => match words::load_file(path) {
                Ok(list) => {
                    log::info!("loaded {} words from {}", list.len(), path.display());
                    (list, None)
                }
                Err(e) => {
                    log::warn!("{e}; using built-in word list");
                    (words::builtin(), Some(e))
                }
            },
            None => (words::builtin(), None),
        };

        (LocalWordService::new(list, config.game.clone(), seed), err)
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.rng.next_u64() % n as u64) as usize
    }

    fn current_entry(&self) -> Result<&WordEntry> {
        self.current
            .and_then(|i| self.words.get(i))
            .ok_or(AppError::NoRound)
    }

    /// True length plus distinct distractors from the configured range,
    /// widened if needed so the true length always fits.
    fn build_options(&mut self, len: usize) -> Vec<usize> {
        let lo = self.settings.min_length.min(len).max(1);
        let hi = self.settings.max_length.max(len);
        let mut pool: Vec<usize> = (lo..=hi).filter(|&n| n != len).collect();
        let want = self.settings.length_choices.max(1) - 1;

        let mut opts = vec![len];
        while opts.len() <= want && !pool.is_empty() {
            let i = self.pick(pool.len());
            opts.push(pool.swap_remove(i));
        }
        opts.sort_unstable();
        opts
    }
}

impl GameApi for LocalWordService {
    fn status(&self) -> ApiStatus {
        if self.words.is_empty() {
            ApiStatus::Disconnected
        } else {
            ApiStatus::Connected
        }
    }

    fn fetch_next_word(&mut self) -> Result<Round> {
        if self.words.is_empty() {
            return Err(AppError::NoWords);
        }
        let n = self.words.len();
        let mut idx = self.pick(n);
        // Don't serve the same word twice in a row.
        if n > 1 && Some(idx) == self.current {
            idx = (idx + 1 + self.pick(n - 1)) % n;
        }
        self.current = Some(idx);

        let entry = &self.words[idx];
        let round = Round { word_length: entry.word.len(), clue: entry.clue.clone() };
        self.options = self.build_options(round.word_length);
        log::debug!("new word #{idx}, {} letters, options {:?}", round.word_length, self.options);
        Ok(round)
    }

    fn length_options(&self) -> Vec<usize> {
        self.options.clone()
    }

    fn guess_length(&mut self, guess: usize) -> Result<LengthFeedback> {
        let len = self.current_entry()?.word.len();
        let feedback = if guess == len {
            LengthFeedback {
                correct: true,
                message: format!("Correct! The word has {len} letters."),
            }
        } else if guess < len {
            LengthFeedback {
                correct: false,
                message: format!("Not {guess}: the word is longer. Try again."),
            }
        } else {
            LengthFeedback {
                correct: false,
                message: format!("Not {guess}: the word is shorter. Try again."),
            }
        };
        Ok(feedback)
    }

    async fn submit_spelling(&mut self, word: &str) -> Result<bool> {
        let target = &self.current_entry()?.word;
        Ok(word.trim().eq_ignore_ascii_case(target))
    }

    fn reveal_answer(&mut self) -> Result<String> {
        Ok(self.current_entry()?.word.clone())
    }
}
