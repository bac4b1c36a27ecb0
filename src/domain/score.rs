/// Session counters: score, correct answers and level.

pub const START_LEVEL: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub correct: u32,
    pub level: u32,
    /// Correct answers per level step (>= 1).
    level_every: u32,
}

impl ScoreBoard {
    pub fn new(level_every: u32) -> Self {
        ScoreBoard {
            score: 0,
            correct: 0,
            level: START_LEVEL,
            level_every: level_every.max(1),
        }
    }

    /// Count one correct answer. Returns true if the level went up.
    pub fn record_correct(&mut self) -> bool {
        self.score += 1;
        self.correct += 1;
        if self.correct % self.level_every == 0 {
            self.level += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.correct = 0;
        self.level = START_LEVEL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_steps_exactly_on_every_third() {
        let mut b = ScoreBoard::new(3);
        assert!(!b.record_correct());
        assert_eq!(b.level, 1);
        assert!(!b.record_correct());
        assert_eq!(b.level, 1);
        assert!(b.record_correct());
        assert_eq!(b.level, 2);
        assert_eq!((b.score, b.correct), (3, 3));

        for _ in 0..3 { b.record_correct(); }
        assert_eq!(b.level, 3);
    }

    #[test]
    fn reset_zeroes_counters() {
        let mut b = ScoreBoard::new(3);
        for _ in 0..7 { b.record_correct(); }
        b.reset();
        assert_eq!(b, ScoreBoard::new(3));
    }

    #[test]
    fn zero_step_is_clamped() {
        let mut b = ScoreBoard::new(0);
        assert!(b.record_correct());
        assert_eq!(b.level, 2);
    }
}
