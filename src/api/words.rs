/// Word lists: the built-in set and the `WORD: clue` file format.
///
/// ## File format
///   One entry per line: `word: clue`. The clue is optional.
///   Blank lines and lines starting with `#` are skipped.
///   Words must be 1+ ASCII letters; they are stored uppercase.

use std::path::Path;

use crate::error::{AppError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
}

const BUILTIN: &[(&str, &str)] = &[
    ("owl", "Night bird that hoots"),
    ("ink", "Fluid for a fountain pen"),
    ("yacht", "Sailing boat built for pleasure"),
    ("gnome", "Small garden figure with a pointed hat"),
    ("knack", "Natural talent for something"),
    ("queue", "Line of people waiting their turn"),
    ("rhyme", "Words that end with the same sound"),
    ("wreath", "Ring of flowers or leaves"),
    ("sphinx", "Riddling creature of Egyptian legend"),
    ("rhythm", "Regular pattern of beats"),
    ("cipher", "Secret way of writing"),
    ("island", "Land surrounded by water"),
    ("answer", "Reply to a question"),
    ("science", "Study of the natural world"),
    ("lettuce", "Leafy salad vegetable"),
    ("schedule", "Plan of times for events"),
    ("calendar", "Table of days, weeks and months"),
    ("separate", "Set apart; not joined"),
    ("definite", "Clearly stated; certain"),
    ("February", "Shortest month of the year"),
    ("restaurant", "Place where meals are served to customers"),
    ("accommodate", "Provide room or lodging for"),
    ("conscience", "Inner sense of right and wrong"),
    ("embarrass", "Make someone feel awkward"),
    ("rhinoceros", "Large animal with a horned snout"),
    ("necessary", "Needed; required"),
    ("occurrence", "Something that happens"),
    ("millennium", "Period of a thousand years"),
    ("Wednesday", "Middle day of the working week"),
    ("knowledge", "Facts and skills gained by learning"),
    ("pneumonia", "Lung infection"),
    ("bureaucracy", "Government by many officials and rules"),
    ("questionnaire", "Written set of questions"),
    ("psychology", "Study of the mind"),
    ("silhouette", "Dark outline against a light background"),
    ("handkerchief", "Square of cloth carried in a pocket"),
    ("guarantee", "Formal promise"),
    ("vacuum", "Space with no matter in it"),
    ("tongue", "Muscle in the mouth used for tasting"),
    ("colonel", "Army officer rank above major"),
    ("island", "Land surrounded by water"),
];

/// The built-in list, uppercased and deduplicated.
pub fn builtin() -> Vec<WordEntry> {
    let mut out: Vec<WordEntry> = Vec::with_capacity(BUILTIN.len());
    for (word, clue) in BUILTIN {
        let word = word.to_ascii_uppercase();
        if !out.iter().any(|e| e.word == word) {
            out.push(WordEntry { word, clue: (*clue).to_string() });
        }
    }
    out
}

/// Load a word file. Errors carry the offending line number.
pub fn load_file(path: &Path) -> Result<Vec<WordEntry>> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::WordFile {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse(&text).map_err(|(line, reason)| AppError::WordParse {
        path: path.to_path_buf(),
        line,
        reason,
    })?;
    if entries.is_empty() {
        return Err(AppError::NoWords);
    }
    Ok(entries)
}

/// Parse word-file text. On failure returns `(1-based line, reason)`.
pub fn parse(text: &str) -> std::result::Result<Vec<WordEntry>, (usize, String)> {
    let mut out = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, clue) = match line.split_once(':') {
            Some((w, c)) => (w.trim(), c.trim()),
            None => (line, ""),
        };
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err((i + 1, format!("not a plain word: {word:?}")));
        }
        out.push(WordEntry {
            word: word.to_ascii_uppercase(),
            clue: clue.to_string(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_clean() {
        let list = builtin();
        assert!(list.len() > 30);
        for e in &list {
            assert!(e.word.chars().all(|c| c.is_ascii_uppercase()), "{}", e.word);
            assert!(!e.clue.is_empty());
        }
        let islands = list.iter().filter(|e| e.word == "ISLAND").count();
        assert_eq!(islands, 1);
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let text = "# header\n\n  apple : Red fruit \nkiwi\n";
        let got = parse(text).unwrap();
        assert_eq!(got, vec![
            WordEntry { word: "APPLE".into(), clue: "Red fruit".into() },
            WordEntry { word: "KIWI".into(), clue: String::new() },
        ]);
    }

    #[test]
    fn parse_reports_bad_line() {
        let err = parse("good: ok\nice cream: two words\n").unwrap_err();
        assert_eq!(err.0, 2);
        assert!(err.1.contains("ice cream"));
    }

    #[test]
    fn load_missing_file_is_word_file_error() {
        let path = std::env::temp_dir().join("orthoplay-no-such-words.txt");
        match load_file(&path) {
            Err(AppError::WordFile { .. }) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn load_comment_only_file_is_empty() {
        let path = std::env::temp_dir().join(format!("orthoplay-words-{}.txt", std::process::id()));
        std::fs::write(&path, "# nothing here\n").unwrap();
        let res = load_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(res, Err(AppError::NoWords)));
    }
}
