/// A single guess letter: always one uppercase ASCII letter A-Z.
///
/// Everything typed or pasted goes through `Letter::from_char` or
/// `sanitize`, so a `Letter` in the buffer can never hold anything else.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Letter(u8);

impl Letter {
    /// Accepts `a-z` / `A-Z`, normalized to uppercase. Anything else is `None`.
    pub fn from_char(c: char) -> Option<Letter> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Strip clipboard text down to its letters, uppercased, in order.
pub fn sanitize(text: &str) -> Vec<Letter> {
    text.chars().filter_map(Letter::from_char).collect()
}
