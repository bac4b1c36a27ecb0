/// Events emitted by session transitions.
/// The presentation layer consumes these for sound.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    LengthCorrect,
    LengthWrong,
    SpellingCorrect,
    LevelUp { level: u32 },
    SpellingWrong,
    AnswerRevealed,
}
