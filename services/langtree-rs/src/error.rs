//! Error type for the clustering core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LangTreeError>;

#[derive(Debug, Error)]
pub enum LangTreeError {
    /// A language did not supply exactly one form per digit.
    #[error("language {language:?} has {found} number words, expected 10")]
    IncompleteEntry { language: String, found: usize },

    #[error("digit {0} is outside 0..=9")]
    InvalidDigit(usize),

    /// The distance table has no entry for a pair the builder needs.
    #[error("no distance between {first:?} and {second:?} for digit {digit}")]
    MissingDistance {
        first: String,
        second: String,
        digit: usize,
    },

    #[error("invalid cluster configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
