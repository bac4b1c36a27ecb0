/// Session transitions: decoded input in, API calls and state changes out.
///
/// ```text
///   LengthGuess ──right length──▶ Spelling ──correct──▶ (next word) LengthGuess
///        ▲                           │
///        │                           └──wrong──▶ GameOver ──Enter──▶ restart
///        └──────────── give up / restart ──────────────────────────────┘
/// ```
///
/// A submission is split in two: `handle_command` raises the loading flag
/// and returns the word, the caller draws a frame, then awaits
/// `resolve_submit`. API failures never end the game; they are logged,
/// shown in the message bar and mark the API as disconnected. A failed
/// fetch leaves `LengthGuess` with no round; only Enter (retry) is accepted.

use crate::api::{ApiStatus, GameApi};
use crate::error::AppError;
use crate::sim::event::GameEvent;
use crate::sim::session::{Command, Overlay, Phase, Reveal, SessionState};
use crate::sim::spelling::SpellingAction;

const MSG_TICKS: u32 = 60;

#[derive(Debug, Default)]
pub struct Outcome {
    pub events: Vec<GameEvent>,
    /// Word waiting for `resolve_submit`.
    pub submit: Option<String>,
    pub quit: bool,
}

fn report_error(s: &mut SessionState, what: &str, err: AppError) {
    log::warn!("{what} failed: {err}");
    s.api_status = ApiStatus::Disconnected;
    s.set_message(&format!("{what} failed: {err}"), 0);
}

/// Fetch a word and open its length prompt. Returns false if the fetch
/// failed; the previous round is dropped either way and Enter retries.
pub fn start_round<A: GameApi>(s: &mut SessionState, api: &mut A) -> bool {
    match api.fetch_next_word() {
        Ok(round) => {
            log::info!("round started: {} letters", round.word_length);
            s.length.set_options(api.length_options());
            s.round = Some(round);
            s.phase = Phase::LengthGuess;
            s.current_guess.clear();
            s.api_status = api.status();
            true
        }
        Err(e) => {
            s.round = None;
            s.phase = Phase::LengthGuess;
            s.length.set_options(Vec::new());
            s.current_guess.clear();
            report_error(s, "Fetching a word", e);
            false
        }
    }
}

pub fn choose_length<A: GameApi>(s: &mut SessionState, api: &mut A, guess: usize) -> Vec<GameEvent> {
    let feedback = match api.guess_length(guess) {
        Ok(fb) => fb,
        Err(e) => {
            report_error(s, "Length check", e);
            return Vec::new();
        }
    };
    let correct = feedback.correct;
    s.length.set_feedback(feedback);

    if !correct {
        return vec![GameEvent::LengthWrong];
    }
    s.word_length = guess;
    s.spelling.new_round(guess);
    s.sync_guess();
    s.reveal = None;
    s.phase = Phase::Spelling;
    log::info!("length {guess} accepted, spelling");
    vec![GameEvent::LengthCorrect]
}

pub fn handle_command<A: GameApi>(s: &mut SessionState, api: &mut A, cmd: Command) -> Outcome {
    let mut out = Outcome::default();

    match cmd {
        Command::Quit => {
            out.quit = true;
            return out;
        }
        Command::ToggleHelp => {
            s.toggle_overlay(Overlay::Help);
            return out;
        }
        Command::ToggleAbout => {
            s.toggle_overlay(Overlay::About);
            return out;
        }
        Command::Back => {
            if s.overlay.take().is_none() {
                out.quit = true;
            }
            return out;
        }
        _ => {}
    }

    // Panels are modal; a pending check locks everything.
    if s.overlay.is_some() || s.spelling.is_loading() {
        return out;
    }

    match s.phase {
        Phase::LengthGuess if s.round.is_none() => {
            if cmd == Command::Enter {
                start_round(s, api);
            }
        }

        Phase::LengthGuess => match cmd {
            Command::Left => s.length.move_left(),
            Command::Right => s.length.move_right(),
            Command::Char(c) => {
                let picked = c.to_digit(10).and_then(|d| s.length.pick_position(d as usize));
                if let Some(n) = picked {
                    out.events = choose_length(s, api, n);
                }
            }
            Command::Enter => {
                if let Some(n) = s.length.selected() {
                    out.events = choose_length(s, api, n);
                }
            }
            Command::GiveUp => out.events = give_up(s, api),
            _ => {}
        },

        Phase::Spelling => {
            if cmd == Command::GiveUp {
                out.events = give_up(s, api);
                return out;
            }
            match s.spelling.handle(&cmd) {
                SpellingAction::Edited => s.sync_guess(),
                SpellingAction::Submit => out.submit = s.spelling.begin_submit(),
                SpellingAction::Ignored => {}
            }
        }

        Phase::GameOver => {
            if cmd == Command::Enter {
                out.events = restart(s, api);
            }
        }
    }

    out
}

/// Await the word check started by `handle_command` and apply it.
pub async fn resolve_submit<A: GameApi>(s: &mut SessionState, api: &mut A, word: &str) -> Vec<GameEvent> {
    let correct = match api.submit_spelling(word).await {
        Ok(c) => c,
        Err(e) => {
            s.spelling.abort_submit();
            report_error(s, "Checking the spelling", e);
            return Vec::new();
        }
    };

    let events = s.spelling.finish_submit(correct);
    s.sync_guess();

    if !s.spelling.is_game_over() {
        log::info!("correct: {word} (score {})", s.spelling.board().score);
        match events.iter().find_map(|e| match e {
            GameEvent::LevelUp { level } => Some(*level),
            _ => None,
        }) {
            Some(level) => s.set_message(&format!("Correct! Level {level} reached"), MSG_TICKS),
            None => s.set_message("Correct!", MSG_TICKS),
        }
        start_round(s, api);
    } else {
        log::info!("wrong: {word}, game over at score {}", s.spelling.board().score);
        s.phase = Phase::GameOver;
        match api.reveal_answer() {
            Ok(answer) => s.reveal = Some(Reveal::new(answer, s.spelling.last_submitted().to_string())),
            Err(e) => log::warn!("no answer to show: {e}"),
        }
    }
    events
}

/// Show the answer and move on to the next word. Counters are untouched.
pub fn give_up<A: GameApi>(s: &mut SessionState, api: &mut A) -> Vec<GameEvent> {
    let answer = match api.reveal_answer() {
        Ok(a) => a,
        Err(e) => {
            report_error(s, "Revealing the answer", e);
            return Vec::new();
        }
    };
    log::info!("gave up on {answer}");
    s.set_message(&format!("The word was {answer}"), MSG_TICKS);
    s.reveal = Some(Reveal::new(answer, s.current_guess.clone()));
    start_round(s, api);
    vec![GameEvent::AnswerRevealed]
}

/// Zero the counters and fetch a fresh word.
pub fn restart<A: GameApi>(s: &mut SessionState, api: &mut A) -> Vec<GameEvent> {
    log::info!("restart");
    s.spelling.restart();
    s.sync_guess();
    s.reveal = None;
    s.message.clear();
    s.message_timer = 0;
    start_round(s, api);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LengthFeedback, Round};
    use crate::error::Result;

    /// Scripted API: serves `words` in order, counts calls.
    struct FakeApi {
        words: Vec<&'static str>,
        next: usize,
        current: Option<&'static str>,
        fetches: usize,
        submitted: Vec<String>,
        fail_submit: bool,
    }

    impl FakeApi {
        fn new(words: &[&'static str]) -> Self {
            FakeApi {
                words: words.to_vec(),
                next: 0,
                current: None,
                fetches: 0,
                submitted: Vec::new(),
                fail_submit: false,
            }
        }
    }

    impl GameApi for FakeApi {
        fn status(&self) -> ApiStatus {
            ApiStatus::Connected
        }

        fn fetch_next_word(&mut self) -> Result<Round> {
            let w = *self.words.get(self.next).ok_or(AppError::NoWords)?;
            self.next += 1;
            self.fetches += 1;
            self.current = Some(w);
            Ok(Round { word_length: w.len(), clue: format!("clue {w}") })
        }

        fn length_options(&self) -> Vec<usize> {
            let n = self.current.map_or(0, str::len);
            vec![n.saturating_sub(1), n, n + 1]
        }

        fn guess_length(&mut self, guess: usize) -> Result<LengthFeedback> {
            let n = self.current.ok_or(AppError::NoRound)?.len();
            Ok(LengthFeedback { correct: guess == n, message: format!("{guess}?") })
        }

        async fn submit_spelling(&mut self, word: &str) -> Result<bool> {
            if self.fail_submit {
                return Err(AppError::NoRound);
            }
            self.submitted.push(word.to_string());
            Ok(self.current.is_some_and(|w| w.eq_ignore_ascii_case(word)))
        }

        fn reveal_answer(&mut self) -> Result<String> {
            Ok(self.current.ok_or(AppError::NoRound)?.to_string())
        }
    }

    fn setup(words: &[&'static str]) -> (SessionState, FakeApi) {
        let mut api = FakeApi::new(words);
        let mut s = SessionState::new(api.status(), 3);
        assert!(start_round(&mut s, &mut api));
        (s, api)
    }

    fn send(s: &mut SessionState, api: &mut FakeApi, cmd: Command) -> Outcome {
        handle_command(s, api, cmd)
    }

    fn type_word(s: &mut SessionState, api: &mut FakeApi, w: &str) {
        for c in w.chars() {
            send(s, api, Command::Char(c));
        }
    }

    /// Pick the right length (options are n-1, n, n+1) and spell `w`.
    fn spell(s: &mut SessionState, api: &mut FakeApi, w: &str) -> Vec<GameEvent> {
        send(s, api, Command::Char('2'));
        assert_eq!(s.phase, Phase::Spelling);
        type_word(s, api, w);
        let out = send(s, api, Command::Enter);
        let word = out.submit.expect("submit");
        assert!(s.spelling.is_loading());
        pollster::block_on(resolve_submit(s, api, &word))
    }

    #[test]
    fn wrong_length_keeps_prompt() {
        let (mut s, mut api) = setup(&["CAT"]);
        let out = send(&mut s, &mut api, Command::Enter); // cursor on n-1
        assert_eq!(out.events, vec![GameEvent::LengthWrong]);
        assert_eq!(s.phase, Phase::LengthGuess);
        assert_eq!(s.length.feedback().map(|f| f.correct), Some(false));

        send(&mut s, &mut api, Command::Right);
        let out = send(&mut s, &mut api, Command::Enter);
        assert_eq!(out.events, vec![GameEvent::LengthCorrect]);
        assert_eq!(s.phase, Phase::Spelling);
        assert_eq!(s.word_length, 3);
        assert_eq!(s.spelling.guess().len(), 3);
    }

    #[test]
    fn letters_ignored_while_guessing_length() {
        let (mut s, mut api) = setup(&["CAT"]);
        send(&mut s, &mut api, Command::Char('x'));
        send(&mut s, &mut api, Command::Paste("abc".into()));
        assert_eq!(s.phase, Phase::LengthGuess);
        assert!(s.length.feedback().is_none());
    }

    #[test]
    fn edits_are_mirrored_to_parent() {
        let (mut s, mut api) = setup(&["HOUSE"]);
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "ho");
        assert_eq!(s.current_guess, "HO");
        send(&mut s, &mut api, Command::Backspace);
        assert_eq!(s.current_guess, "H");
        send(&mut s, &mut api, Command::Paste("ouse".into()));
        assert_eq!(s.current_guess, "HOUSE");
    }

    #[test]
    fn enter_on_partial_word_does_nothing() {
        let (mut s, mut api) = setup(&["CATSY"]);
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "cat");
        send(&mut s, &mut api, Command::Paste("S".into()));
        let out = send(&mut s, &mut api, Command::Enter);
        assert!(out.submit.is_none());
        assert!(!s.spelling.is_loading());
        assert!(api.submitted.is_empty());
    }

    #[test]
    fn correct_answers_advance_and_level_up() {
        let (mut s, mut api) = setup(&["ONE", "TWO", "SIX", "TEN"]);
        spell(&mut s, &mut api, "one");
        spell(&mut s, &mut api, "two");
        assert_eq!(s.spelling.board().correct, 2);
        assert_eq!(s.spelling.board().level, 1);

        let events = spell(&mut s, &mut api, "six");
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        assert_eq!(s.spelling.board().correct, 3);
        assert_eq!(s.spelling.board().level, 2);
        assert_eq!(s.current_guess, "");
        assert_eq!(api.fetches, 4, "next word requested after each success");
        assert_eq!(s.phase, Phase::LengthGuess);
        assert!(!s.spelling.is_loading());
    }

    #[test]
    fn wrong_answer_is_game_over_until_restart() {
        let (mut s, mut api) = setup(&["CAT", "DOG"]);
        let events = spell(&mut s, &mut api, "cot");
        assert_eq!(events, vec![GameEvent::SpellingWrong]);
        assert_eq!(s.phase, Phase::GameOver);
        let reveal = s.reveal.clone().expect("answer shown");
        assert_eq!(reveal.answer, "CAT");
        assert_eq!(reveal.guess, "COT");
        assert_eq!(api.fetches, 1);

        // Frozen: typing and give-up do nothing.
        send(&mut s, &mut api, Command::Char('a'));
        send(&mut s, &mut api, Command::GiveUp);
        assert_eq!(s.phase, Phase::GameOver);

        send(&mut s, &mut api, Command::Enter);
        assert_eq!(s.phase, Phase::LengthGuess);
        assert_eq!(api.fetches, 2);
        assert_eq!(s.spelling.board().score, 0);
        assert!(!s.spelling.is_game_over());
        assert!(s.reveal.is_none());
    }

    #[test]
    fn input_locked_while_checking() {
        let (mut s, mut api) = setup(&["AB", "CD"]);
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "ab");
        let word = send(&mut s, &mut api, Command::Enter).submit.unwrap();

        send(&mut s, &mut api, Command::Backspace);
        send(&mut s, &mut api, Command::GiveUp);
        assert!(send(&mut s, &mut api, Command::Enter).submit.is_none());
        assert_eq!(s.current_guess, "AB");

        pollster::block_on(resolve_submit(&mut s, &mut api, &word));
        assert_eq!(api.submitted, vec!["AB".to_string()]);
        assert!(!s.spelling.is_loading());
    }

    #[test]
    fn failed_check_unlocks_without_game_over() {
        let (mut s, mut api) = setup(&["AB"]);
        api.fail_submit = true;
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "ab");
        let word = send(&mut s, &mut api, Command::Enter).submit.unwrap();
        let events = pollster::block_on(resolve_submit(&mut s, &mut api, &word));
        assert!(events.is_empty());
        assert_eq!(s.phase, Phase::Spelling);
        assert!(!s.spelling.is_loading());
        assert_eq!(s.api_status, ApiStatus::Disconnected);
        assert!(s.message.contains("failed"));
    }

    #[test]
    fn give_up_reveals_and_moves_on() {
        let (mut s, mut api) = setup(&["CRATE", "MOUSE"]);
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "tra");
        let out = send(&mut s, &mut api, Command::GiveUp);
        assert_eq!(out.events, vec![GameEvent::AnswerRevealed]);
        let reveal = s.reveal.clone().unwrap();
        assert_eq!(reveal.answer, "CRATE");
        assert_eq!(reveal.guess, "TRA");
        assert!(s.message.contains("CRATE"));
        assert_eq!(s.phase, Phase::LengthGuess);
        assert_eq!(s.round.as_ref().map(|r| r.word_length), Some(5));
        assert_eq!(s.spelling.board().score, 0);
        assert!(!s.spelling.is_game_over());
    }

    #[test]
    fn fetch_failure_is_reported() {
        let (mut s, mut api) = setup(&["AB"]);
        send(&mut s, &mut api, Command::Char('2'));
        type_word(&mut s, &mut api, "ab");
        let word = send(&mut s, &mut api, Command::Enter).submit.unwrap();
        pollster::block_on(resolve_submit(&mut s, &mut api, &word));
        // Out of words: the success stands, the fetch error is shown.
        assert_eq!(s.spelling.board().score, 1);
        assert_eq!(s.api_status, ApiStatus::Disconnected);
        assert!(s.message.contains("Fetching a word failed"));

        // The solved word is gone; it can't be spelled and scored again.
        assert_eq!(s.phase, Phase::LengthGuess);
        assert!(s.round.is_none());
        assert!(s.length.options().is_empty());
        send(&mut s, &mut api, Command::Char('1'));
        type_word(&mut s, &mut api, "ab");
        assert!(send(&mut s, &mut api, Command::Enter).submit.is_none());
        assert_eq!(s.phase, Phase::LengthGuess);
        assert_eq!(api.submitted, vec!["AB".to_string()]);
        assert_eq!(s.spelling.board().score, 1);
    }

    #[test]
    fn fetch_failure_after_give_up_closes_the_round() {
        let (mut s, mut api) = setup(&["AB"]);
        send(&mut s, &mut api, Command::Char('2'));
        let out = send(&mut s, &mut api, Command::GiveUp);
        assert_eq!(out.events, vec![GameEvent::AnswerRevealed]);
        assert_eq!(s.reveal.as_ref().map(|r| r.answer.as_str()), Some("AB"));
        assert!(s.message.contains("Fetching a word failed"));

        assert_eq!(s.phase, Phase::LengthGuess);
        assert!(s.round.is_none());
        type_word(&mut s, &mut api, "ab");
        assert!(send(&mut s, &mut api, Command::Enter).submit.is_none());
        send(&mut s, &mut api, Command::GiveUp);
        assert!(api.submitted.is_empty());
        assert_eq!(s.spelling.board().score, 0);
    }

    #[test]
    fn enter_retries_a_failed_fetch() {
        let (mut s, mut api) = setup(&["AB"]);
        send(&mut s, &mut api, Command::Char('2'));
        send(&mut s, &mut api, Command::GiveUp);
        assert!(s.round.is_none());

        api.words.push("KITE");
        send(&mut s, &mut api, Command::Enter);
        assert_eq!(api.fetches, 2);
        assert_eq!(s.round.as_ref().map(|r| r.word_length), Some(4));
        assert_eq!(s.length.options(), &[3, 4, 5]);
        assert_eq!(s.api_status, ApiStatus::Connected);
    }

    #[test]
    fn fake_length_options_before_any_fetch() {
        let api = FakeApi::new(&[]);
        assert_eq!(api.length_options(), vec![0, 0, 1]);
    }

    #[test]
    fn overlays_are_modal() {
        let (mut s, mut api) = setup(&["CAT"]);
        send(&mut s, &mut api, Command::ToggleHelp);
        send(&mut s, &mut api, Command::Char('2'));
        assert_eq!(s.phase, Phase::LengthGuess);

        let out = send(&mut s, &mut api, Command::Back);
        assert!(!out.quit);
        assert!(s.overlay.is_none());
        assert!(send(&mut s, &mut api, Command::Back).quit);
        assert!(send(&mut s, &mut api, Command::Quit).quit);
    }
}
