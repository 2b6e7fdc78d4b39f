use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the delivery API failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected. (e.g. an entry without
    /// a `sys.id`)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type ContentResult<T> = Result<T, ContentError>;
