//! 目标 URL 校验（仅前端使用，核心服务不做校验）

use url::Url;

use crate::errors::{Result, ShortlifeError};

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Check that `raw` is an absolute http(s) URL with a host.
///
/// Returns the trimmed input unchanged on success so the stored target is
/// exactly what the caller typed.
pub fn validate_target_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShortlifeError::validation("URL cannot be empty"));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ShortlifeError::validation(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ShortlifeError::validation(format!(
            "Unsupported scheme '{}:'. Only http:// and https:// are allowed",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ShortlifeError::validation("URL must contain a host"));
    }

    Ok(trimmed.to_string())
}
