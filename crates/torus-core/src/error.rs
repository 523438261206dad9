use thiserror::Error;

/// Errors raised while loading a timed caption track.
#[derive(Debug, Error, PartialEq)]
pub enum CaptionError {
    #[error("line {line}: expected a `[mm:ss.xx]` timestamp")]
    MissingTimestamp { line: usize },
    #[error("line {line}: malformed timestamp `{stamp}`")]
    BadTimestamp { line: usize, stamp: String },
    #[error("line {line}: unterminated `[`")]
    Unterminated { line: usize },
}
