/// Letter grading against the answer, matching the legend's three colors.
///
/// Exact matches are settled first and consume their answer letter, so a
/// duplicate guess letter is only `Misplaced` while unmatched copies remain.

use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LetterMark {
    /// Right letter, right position.
    Correct,
    /// Right letter, wrong position.
    Misplaced,
    /// Letter not in word.
    Incorrect,
}

impl LetterMark {
    pub const ALL: [LetterMark; 3] = [LetterMark::Correct, LetterMark::Misplaced, LetterMark::Incorrect];

    pub fn label(self) -> &'static str {
        match self {
            LetterMark::Correct => "Correct",
            LetterMark::Misplaced => "Misplaced",
            LetterMark::Incorrect => "Incorrect",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            LetterMark::Correct => "Right letter, right position",
            LetterMark::Misplaced => "Right letter, wrong position",
            LetterMark::Incorrect => "Letter not in word",
        }
    }
}

/// One mark per character of `guess`. Case-insensitive.
pub fn grade(guess: &str, answer: &str) -> Vec<LetterMark> {
    let guess: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
    let answer: Vec<char> = answer.chars().map(|c| c.to_ascii_uppercase()).collect();

    let mut marks = vec![LetterMark::Incorrect; guess.len()];
    let mut unmatched: HashMap<char, usize> = HashMap::new();

    for (i, &a) in answer.iter().enumerate() {
        if guess.get(i) == Some(&a) {
            marks[i] = LetterMark::Correct;
        } else {
            *unmatched.entry(a).or_insert(0) += 1;
        }
    }

    for (i, g) in guess.iter().enumerate() {
        if marks[i] == LetterMark::Correct {
            continue;
        }
        if let Some(n) = unmatched.get_mut(g).filter(|n| **n > 0) {
            *n -= 1;
            marks[i] = LetterMark::Misplaced;
        }
    }

    marks
}
