//! Step 2: caption the image via an OpenAI-style chat-completions endpoint.
//!
//! The image travels inline as a base64 data URL. The response shape is not
//! contractually guaranteed, so it is kept as a loose `serde_json::Value`
//! and forwarded verbatim by the submission step.

use base64::Engine;
use serde::Serialize;
use serde_json::Value;

use crate::acquire::ImageAsset;
use crate::config::PipelineConfig;
use crate::error::{RelayError, RelayResult};
use crate::http::{excerpt, RelayClient};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrlRef },
}

#[derive(Debug, Serialize)]
struct ImageUrlRef {
    url: String,
}

/// Re-encode the image as a base64 data URL for the request payload.
fn to_data_url(asset: &ImageAsset) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&asset.bytes);
    format!("data:{};base64,{}", asset.content_type, encoded)
}

/// Run the inference step: one POST, one parsed JSON response.
pub async fn infer(
    client: &RelayClient,
    cfg: &PipelineConfig,
    asset: &ImageAsset,
) -> RelayResult<Value> {
    tracing::info!(url = %cfg.inference_url, model = %cfg.model, "requesting caption");

    let request = ChatRequest {
        model: &cfg.model,
        messages: vec![Message {
            role: "user",
            content: vec![
                ContentPart::Text { text: &cfg.prompt },
                ContentPart::ImageUrl {
                    image_url: ImageUrlRef {
                        url: to_data_url(asset),
                    },
                },
            ],
        }],
        max_tokens: cfg.max_tokens,
    };

    let resp = client
        .post_json(&cfg.inference_url, &cfg.token, &request, cfg.inference_timeout)
        .await?;
    tracing::debug!(status = resp.status, "inference endpoint replied");

    if !resp.is_success() {
        return Err(RelayError::Http {
            context: "inference request",
            status: resp.status,
            body: excerpt(&resp.body),
        });
    }

    serde_json::from_str(&resp.body)
        .map_err(|e| RelayError::Parse(format!("inference response is not JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_matches_wire_format() {
        let asset = ImageAsset {
            bytes: b"img".to_vec(),
            content_type: "image/png".to_string(),
        };
        let request = ChatRequest {
            model: "test-model",
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text { text: "<CAPTION>" },
                    ContentPart::ImageUrl {
                        image_url: ImageUrlRef {
                            url: to_data_url(&asset),
                        },
                    },
                ],
            }],
            max_tokens: 500,
        };

        let expected = json!({
            "model": "test-model",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "<CAPTION>"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,aW1n"}}
                ]
            }],
            "max_tokens": 500
        });

        assert_eq!(serde_json::to_value(&request).unwrap(), expected);
    }

    #[test]
    fn data_url_embeds_content_type() {
        let asset = ImageAsset {
            bytes: vec![0xff, 0xd8],
            content_type: "image/jpeg".to_string(),
        };
        let url = to_data_url(&asset);
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }
}
