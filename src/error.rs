use thiserror::Error;

use crate::board::WORD_LENGTH;

/// Failures talking to the word service. Never interpreted as "invalid word".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("word service returned status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("word service unavailable: {0}")]
    ServiceUnavailable(#[from] ServiceError),
    #[error("no words available to play")]
    EmptyWordList,
    #[error("please fill all {len} letters", len = WORD_LENGTH)]
    IncompleteGuess,
    #[error("already guessed {0}")]
    DuplicateGuess(String),
    #[error("{0} is not a valid word")]
    InvalidWord(String),
    #[error("session is not active")]
    Inactive,
    #[error("a guess is already being checked")]
    ValidationPending,
    #[error("validation result no longer matches the current row")]
    StaleValidation,
    #[error("session duration must be at least one second")]
    ZeroDuration,
}

impl GameError {
    /// Rejections the player can fix by editing the current row
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::IncompleteGuess | GameError::DuplicateGuess(_) | GameError::InvalidWord(_)
        )
    }
}

/// Problems loading the served word list
#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundled word list {0} not found")]
    MissingBundle(String),
    #[error("word list contains no five-letter words")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_recoverable() {
        assert!(GameError::IncompleteGuess.is_rejection());
        assert!(GameError::DuplicateGuess("CRANE".into()).is_rejection());
        assert!(GameError::InvalidWord("XXXXX".into()).is_rejection());
        assert!(!GameError::EmptyWordList.is_rejection());
        assert!(!GameError::Inactive.is_rejection());
    }

    #[test]
    fn test_service_error_converts_to_unavailable() {
        let err: GameError = ServiceError::Status {
            url: "http://localhost/api/words".into(),
            status: 503,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "word service unavailable: word service returned status 503 for http://localhost/api/words"
        );
    }

    #[test]
    fn test_incomplete_guess_message_mentions_length() {
        assert_eq!(
            GameError::IncompleteGuess.to_string(),
            "please fill all 5 letters"
        );
    }
}
