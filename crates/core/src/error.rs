//! Error types shared across the CLM crates

use thiserror::Error;

/// Fatal configuration-time errors.
///
/// Everything past construction degrades gracefully instead of erroring:
/// malformed schema blocks fall back to the natural-language path, missing
/// entities fall back to regex heuristics, and an expanded compression is
/// replaced by the original input.
#[derive(Error, Debug)]
pub enum ClmError {
    #[error("no language bundle for {0}")]
    UnsupportedLanguage(String),

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClmError>;
