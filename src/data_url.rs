//! Data-URL decoding for inline page images.
//!
//! Handles the `data:<mediatype>[;base64],<payload>` form. The payload is
//! either base64 or percent-encoded; both appear in the wild for inline
//! images, base64 overwhelmingly so.

use base64::Engine;
use percent_encoding::percent_decode_str;

use crate::error::{RelayError, RelayResult};

/// Decode a data URL into raw bytes plus its declared media type.
///
/// A missing comma separator or a missing media type is a parse error, as
/// is an undecodable payload.
pub fn parse(src: &str) -> RelayResult<(Vec<u8>, String)> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| RelayError::Parse("not a data URL".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| RelayError::Parse("data URL has no comma separator".to_string()))?;

    let media_type = header
        .split(';')
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| RelayError::Parse("data URL declares no media type".to_string()))?;

    let bytes = if header.contains(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| RelayError::Parse(format!("invalid base64 payload: {e}")))?
    } else {
        percent_decode_str(payload).collect()
    };

    Ok((bytes, media_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn decodes_base64_payload() {
        let payload = base64::engine::general_purpose::STANDARD.encode(b"pixels");
        let (bytes, mime) = parse(&format!("data:image/png;base64,{payload}")).unwrap();
        assert_eq!(bytes, b"pixels");
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn decodes_percent_encoded_payload() {
        let (bytes, mime) = parse("data:image/svg+xml,%3Csvg%3E%3C%2Fsvg%3E").unwrap();
        assert_eq!(bytes, b"<svg></svg>");
        assert_eq!(mime, "image/svg+xml");
    }

    #[test]
    fn rejects_missing_comma() {
        assert!(matches!(
            parse("data:image/png;base64"),
            Err(RelayError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_media_type() {
        assert!(matches!(
            parse("data:;base64,aGk="),
            Err(RelayError::Parse(_))
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            parse("data:image/png;base64,@@@"),
            Err(RelayError::Parse(_))
        ));
    }

    #[test]
    fn rejects_non_data_url() {
        assert!(matches!(
            parse("https://example.com/pic.png"),
            Err(RelayError::Parse(_))
        ));
    }
}
