use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("Quote request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Quote transport failed: {0}")]
    Transport(String),
    #[error("Quote rejected: {0}")]
    Rejected(String),
}

impl QuoteError {
    /// Timeouts and transport failures may succeed on a second attempt; a
    /// rejection will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuoteError::Timeout(_) | QuoteError::Transport(_))
    }
}
