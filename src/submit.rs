//! Step 3: forward the model response to the validation endpoint.

use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::{RelayError, RelayResult};
use crate::http::{excerpt, RelayClient};

/// Body fragments the validation endpoint is known to answer with when a
/// submission is graded correct. The endpoint's real contract is
/// undocumented; these plus a 2xx status are the observed signals.
const SUCCESS_TOKENS: [&str; 2] = ["sucesso", "correct"];

/// Whether a submission response indicates acceptance: a known success
/// token anywhere in the body (case-insensitive), or a 2xx status.
pub fn is_accepted(status: u16, body: &str) -> bool {
    let lower = body.to_lowercase();
    if SUCCESS_TOKENS.iter().any(|t| lower.contains(t)) {
        return true;
    }

    (200..300).contains(&status)
}

/// Run the submission step: POST the inference response verbatim and judge
/// the reply.
pub async fn submit(
    client: &RelayClient,
    cfg: &PipelineConfig,
    response: &Value,
) -> RelayResult<()> {
    tracing::info!(url = %cfg.submit_url, "submitting model response");

    let resp = client
        .post_json(&cfg.submit_url, &cfg.token, response, cfg.timeout)
        .await?;
    tracing::debug!(status = resp.status, body = %excerpt(&resp.body), "validation endpoint replied");

    if is_accepted(resp.status, &resp.body) {
        tracing::info!("submission accepted");
        Ok(())
    } else {
        Err(RelayError::Rejected {
            status: resp.status,
            body: excerpt(&resp.body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_in_body_wins_regardless_of_status() {
        assert!(is_accepted(500, "Resultado: SuCeSsO!"));
        assert!(is_accepted(404, "your answer was Correct"));
    }

    #[test]
    fn success_status_without_token() {
        assert!(is_accepted(200, ""));
        assert!(is_accepted(204, "recorded"));
    }

    #[test]
    fn failure_status_without_token() {
        assert!(!is_accepted(500, "wrong answer"));
        assert!(!is_accepted(400, "{\"error\":\"bad payload\"}"));
    }
}
