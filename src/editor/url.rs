//! Target URL validation

use ::url::Url;

use crate::error::PreviewError;

/// Accept relative paths and absolute http(s) URLs
///
/// The error is the exact text shown under the URL input.
pub fn validate_url(input: &str) -> Result<(), PreviewError> {
    if input.trim().is_empty() {
        return Err(PreviewError::InvalidUrl("URL is required".into()));
    }

    // Same-origin path, resolved against the editor
    if input.starts_with('/') {
        return Ok(());
    }

    match Url::parse(input) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(PreviewError::InvalidUrl(
            "URL must use http:// or https://".into(),
        )),
        Err(_) => Err(PreviewError::InvalidUrl("Invalid URL format".into())),
    }
}
