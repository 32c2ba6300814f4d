//! Validation of images submitted as base64 data URLs.
//!
//! Recipe images and avatars arrive as `data:image/<type>;base64,<payload>`
//! and are stored verbatim once the payload decodes.

use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

/// Validates a `data:image/...;base64,` URL.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the prefix is missing, the media type is
/// not an image, or the payload is empty or not valid base64.
pub fn validate_data_url(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = |reason: &str| {
        AppError::bad_request(
            "Invalid image",
            json!({ "field": field, "reason": reason }),
        )
    };

    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| invalid("expected a data URL"))?;
    let (media, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing payload"))?;
    let media_type = media
        .strip_suffix(";base64")
        .ok_or_else(|| invalid("payload must be base64 encoded"))?;

    let subtype = media_type
        .strip_prefix("image/")
        .ok_or_else(|| invalid("media type must be an image"))?;
    if subtype.is_empty() {
        return Err(invalid("media type must be an image"));
    }

    if payload.is_empty() {
        return Err(invalid("empty payload"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| invalid("payload is not valid base64"))?;

    Ok(())
}
