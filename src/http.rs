//! Async HTTP plumbing shared by all pipeline steps, wrapping reqwest.
//!
//! No retry and no backoff: every call is made exactly once and its failure
//! stops the pipeline. The connection for each call is scoped to the call.

use std::time::Duration;

use crate::error::{RelayError, RelayResult};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// How much of a response body ends up in error messages.
const BODY_EXCERPT_LEN: usize = 300;

/// Status and body text of a POST response, left for the caller to judge.
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

impl TextResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the relay pipeline.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
}

impl RelayClient {
    /// Create a new client with a standard Chrome user-agent.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET a page and return its body as text. Non-2xx is an error.
    pub async fn get_text(&self, url: &str, timeout: Duration) -> RelayResult<String> {
        let resp = self.client.get(url).timeout(timeout).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        if !(200..300).contains(&status) {
            return Err(RelayError::Http {
                context: "page fetch",
                status,
                body: excerpt(&body),
            });
        }

        Ok(body)
    }

    /// GET raw bytes plus the declared `Content-Type`, if any.
    /// Non-2xx is an error.
    pub async fn get_bytes(
        &self,
        url: &str,
        timeout: Duration,
    ) -> RelayResult<(Vec<u8>, Option<String>)> {
        let resp = self.client.get(url).timeout(timeout).send().await?;
        let status = resp.status().as_u16();

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string());

        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::Http {
                context: "image download",
                status,
                body: excerpt(&body),
            });
        }

        let bytes = resp.bytes().await?.to_vec();
        Ok((bytes, content_type))
    }

    /// POST a JSON payload with bearer auth and return status plus body
    /// text. The caller decides what the status means; transport failures
    /// are the only errors here.
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        payload: &T,
        timeout: Duration,
    ) -> RelayResult<TextResponse> {
        let resp = self
            .client
            .post(url)
            .timeout(timeout)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        Ok(TextResponse { status, body })
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a response body for inclusion in an error message.
pub(crate) fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_LEN {
        body.to_string()
    } else {
        let cut: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        format!("{cut}...")
    }
}
