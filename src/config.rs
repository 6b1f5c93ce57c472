//! Pipeline configuration.
//!
//! One explicit structure carries everything the pipeline needs; there is no
//! process-wide mutable state. Defaults reproduce the deployed endpoints so
//! running the binary with no flags behaves like the original job.

use std::time::Duration;

use crate::error::{RelayError, RelayResult};

pub const DEFAULT_PAGE_URL: &str =
    "https://intern.aiaxuropenings.com/scrape/e0681d59-2dbb-4b32-91b6-1e4da0c4a0f4";
pub const DEFAULT_INFERENCE_URL: &str = "https://intern.aiaxuropenings.com/v1/chat/completions";
pub const DEFAULT_SUBMIT_URL: &str = "https://intern.aiaxuropenings.com/api/submit-response";
pub const DEFAULT_MODEL: &str = "microsoft-florence-2-large";
pub const DEFAULT_PROMPT: &str = "<DETAILED_CAPTION>";
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Everything one pipeline run needs, resolved before the first request.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page to scrape for an image.
    pub page_url: String,
    /// Chat-completions endpoint.
    pub inference_url: String,
    /// Validation endpoint the model response is forwarded to.
    pub submit_url: String,
    /// Bearer token sent to the inference and validation endpoints.
    pub token: String,
    /// Model identifier for the chat-completions payload.
    pub model: String,
    /// Instruction tag sent alongside the image.
    pub prompt: String,
    /// Response length cap for the model.
    pub max_tokens: u32,
    /// Timeout for the page fetch, image download, and submission.
    pub timeout: Duration,
    /// Timeout for the inference call, which is slower than the rest.
    pub inference_timeout: Duration,
}

/// Resolve the bearer token: explicit value first, then the `AUTH_TOKEN`
/// env var. A missing token is an error; nothing downstream authenticates
/// without it.
pub fn resolve_token(explicit: Option<&str>) -> RelayResult<String> {
    if let Some(token) = explicit {
        return Ok(token.to_string());
    }

    std::env::var("AUTH_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            RelayError::Unexpected(
                "no bearer token: pass --token or set the AUTH_TOKEN env var".to_string(),
            )
        })
}

/// Timeout for the inference call, which is slower than the rest: double
/// the base timeout, saturating instead of overflowing.
pub fn inference_timeout(base: Duration) -> Duration {
    base.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_resolution_precedence() {
        std::env::set_var("AUTH_TOKEN", "from-env");
        assert_eq!(resolve_token(Some("from-flag")).unwrap(), "from-flag");
        assert_eq!(resolve_token(None).unwrap(), "from-env");
        std::env::remove_var("AUTH_TOKEN");
        assert!(matches!(
            resolve_token(None),
            Err(RelayError::Unexpected(_))
        ));
    }

    #[test]
    fn inference_timeout_doubles_and_saturates() {
        assert_eq!(
            inference_timeout(Duration::from_secs(30)),
            Duration::from_secs(60)
        );
        assert_eq!(inference_timeout(Duration::from_secs(u64::MAX)), Duration::MAX);
    }
}
