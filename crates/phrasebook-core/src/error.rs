//! Error types for quiz sessions and the snippet store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

/// Errors that can occur while setting up or running a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The corpus has no items, so there is nothing to ask.
    #[error("cannot start a quiz: the corpus is empty")]
    EmptyCorpus,

    /// The requested quiz size was zero.
    #[error("quiz size must be at least 1")]
    ZeroQuizSize,

    /// The session is not in a state that allows the requested operation.
    #[error("session is {0}, expected initialized")]
    InvalidState(SessionState),

    /// A session result was requested for zero answers.
    #[error("no questions were answered")]
    NoAnswers,

    /// Reading an answer failed. Passed through unchanged.
    #[error(transparent)]
    Input(#[from] io::Error),
}

impl QuizError {
    /// Returns `true` if the quiz as requested can never run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QuizError::EmptyCorpus | QuizError::ZeroQuizSize)
    }
}

/// Errors raised by the snippet store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The library file does not exist.
    #[error("snippet library not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A line could not be decoded as a snippet.
    #[error("{}:{line}: malformed snippet: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A snippet could not be encoded.
    #[error("failed to encode snippet: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading or writing the library failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_classified() {
        assert!(QuizError::EmptyCorpus.is_configuration());
        assert!(QuizError::ZeroQuizSize.is_configuration());
        assert!(!QuizError::NoAnswers.is_configuration());
        assert!(!QuizError::InvalidState(SessionState::Completed).is_configuration());
    }

    #[test]
    fn input_error_is_transparent() {
        let err = QuizError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        assert_eq!(err.to_string(), "stdin closed");
    }
}
