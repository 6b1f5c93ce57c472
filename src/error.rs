//! Error types for the relay pipeline.

/// Errors that can occur while running the relay pipeline.
///
/// None of these are recoverable at the point of detection; there is no
/// retry policy. Each step surfaces exactly one of these and the
/// orchestrator stops at the first error it sees.
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{context} failed with HTTP {status}: {body}")]
    Http {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no image element found on the page")]
    NoImage,

    #[error("submission not accepted (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Convenience result type.
pub type RelayResult<T> = Result<T, RelayError>;
