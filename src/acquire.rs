//! Step 1: fetch the source page and pull out its first image.
//!
//! The `src` of the first `<img>` element is either a data URL, decoded in
//! place, or a normal URL, resolved against the page URL and downloaded with
//! a second request.

use scraper::{Html, Selector};
use url::Url;

use crate::config::PipelineConfig;
use crate::data_url;
use crate::error::{RelayError, RelayResult};
use crate::http::RelayClient;

/// MIME type assumed when the image response declares none.
const FALLBACK_MIME: &str = "image/jpeg";

/// A scraped image: raw bytes plus declared MIME type. Lives for one
/// pipeline run and is handed to the inference step once.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Find the `src` of the first `<img>` element on the page. The first
/// image is authoritative: if it has no usable `src`, the page has nothing
/// to scrape and later images are not considered.
pub fn find_image_src(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img").ok()?;

    document
        .select(&selector)
        .next()?
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Run the acquisition step end to end.
pub async fn acquire_image(
    client: &RelayClient,
    cfg: &PipelineConfig,
) -> RelayResult<ImageAsset> {
    tracing::info!(url = %cfg.page_url, "fetching source page");
    let html = client.get_text(&cfg.page_url, cfg.timeout).await?;

    let src = find_image_src(&html).ok_or(RelayError::NoImage)?;
    tracing::debug!(src_prefix = %src.chars().take(100).collect::<String>(), "found image source");

    if src.starts_with("data:") {
        let (bytes, content_type) = data_url::parse(&src)?;
        tracing::info!(len = bytes.len(), mime = %content_type, "decoded inline image");
        return Ok(ImageAsset {
            bytes,
            content_type,
        });
    }

    // join() handles both relative and absolute references.
    let absolute = Url::parse(&cfg.page_url)?.join(&src)?;
    tracing::info!(url = %absolute, "downloading image");
    let (bytes, content_type) = client.get_bytes(absolute.as_str(), cfg.timeout).await?;
    tracing::info!(len = bytes.len(), "image downloaded");

    Ok(ImageAsset {
        bytes,
        content_type: content_type.unwrap_or_else(|| FALLBACK_MIME.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_image() {
        let html = r#"<html><body>
            <p>text</p>
            <img src="/a.png">
            <img src="/b.png">
        </body></html>"#;
        assert_eq!(find_image_src(html).as_deref(), Some("/a.png"));
    }

    #[test]
    fn first_image_without_src_fails_the_lookup() {
        assert_eq!(find_image_src(r#"<img alt="decoy"><img src="later.png">"#), None);
        assert_eq!(find_image_src(r#"<img src="  "><img src="real.jpg">"#), None);
    }

    #[test]
    fn no_image_yields_none() {
        assert_eq!(find_image_src("<html><body><p>empty</p></body></html>"), None);
    }

    #[test]
    fn relative_src_resolves_against_page() {
        let absolute = Url::parse("https://example.com/gallery")
            .unwrap()
            .join("/assets/pic.jpg")
            .unwrap();
        assert_eq!(absolute.as_str(), "https://example.com/assets/pic.jpg");
    }
}
