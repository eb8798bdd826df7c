//! Errors raised while interpreting directive values.
//!
//! Option resolution never surfaces these: a malformed value falls back to
//! its default. They exist so that callers with an ordered fallback (the
//! physical layout modes) can tell a missing directive from a broken one.

use thiserror::Error;

/// A directive value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("value is empty")]
    Empty,

    #[error("invalid number `{0}`")]
    Number(String),

    #[error("expected {expected} in `{value}`")]
    Malformed {
        value: String,
        expected: &'static str,
    },
}
