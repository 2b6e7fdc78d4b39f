use portfolio_content::ContentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected. (e.g. no choices
    /// returned in a completion)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
    /// The model refused to process the input.
    #[error("Refusal: {0}")]
    Refusal(String),
}

pub type CompletionResult<T> = Result<T, CompletionError>;

impl From<ContentError> for CompletionError {
    fn from(error: ContentError) -> Self {
        match error {
            ContentError::InvalidInput(message) => Self::InvalidInput(message),
            ContentError::Transport(error) => Self::Transport(error),
            ContentError::StatusCode(status, body) => Self::StatusCode(status, body),
            ContentError::Invariant(provider, message) => Self::Invariant(provider, message),
        }
    }
}

/// Rejections raised by the chat session before any request leaves it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    /// Whitespace-only input never leaves the idle state.
    #[error("Message is empty")]
    EmptyMessage,
    /// A response is already being generated for this session.
    #[error("A response is already being generated")]
    Busy,
}
