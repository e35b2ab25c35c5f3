/// Address validation and display-title derivation for App Dock
use url::Url;

use crate::Result;
use crate::error::DockError;

/// Label used when an address cannot produce anything better
pub const FALLBACK_TITLE: &str = "Web App";

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Parse a user-supplied address, accepting only absolute http(s) URLs
pub fn parse_address(address: &str) -> Result<Url> {
    let url = Url::parse(address).map_err(|_| DockError::InvalidAddress(address.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(DockError::InvalidAddress(address.to_string()));
    }

    Ok(url)
}

/// Derive a short display title from an address
///
/// Algorithm:
/// 1. Parse the address (unparsable → "Web App")
/// 2. Strip a leading "www." from the host
/// 3. Take the last non-empty path segment
/// 4. If that segment looks like a file name, keep only the part before the first "."
/// 5. With no path segments, use the host
/// 6. An empty result (e.g. a dot-file segment) → "Web App"
///
/// Examples:
/// - https://example.com/profile → profile
/// - https://www.example.com/ → example.com
/// - https://x.test/report.pdf → report
/// - https://x.test/.hidden → Web App
pub fn derive_title(address: &str) -> String {
    let Ok(url) = Url::parse(address) else {
        return FALLBACK_TITLE.to_string();
    };

    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    let last_segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

    let title = match last_segment {
        Some(segment) => segment.split('.').next().unwrap_or(segment),
        None => host,
    };

    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title.to_string()
    }
}
