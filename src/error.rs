/// Crate-wide error type.
///
/// Wrong answers are not errors: the word check reports them as `false`.
/// These variants cover the plumbing around it (word source, terminal).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not read word file {path}: {source}")]
    WordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: {reason}")]
    WordParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("word list is empty")]
    NoWords,
    #[error("no word has been fetched yet")]
    NoRound,
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;
