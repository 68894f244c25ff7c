//! Allowlist validation for external image URLs.
//!
//! Only TMDB images are accepted. Paths coming from the database are checked
//! before a URL is assembled, and the assembled URL is checked against the
//! allowlist entry for its host.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::{DEFAULT_IMAGE_SIZE, FALLBACK_IMAGE_URL, MAX_ALT_TEXT_LENGTH, TMDB_IMAGE_HOST};
use crate::errors::{codes, AppError, AppResult};

/// Allowlist entry for one image host
#[derive(Debug)]
pub struct ImageDomain {
    pub hostname: &'static str,
    pub scheme: &'static str,
    pub path_pattern: Regex,
    pub allowed_sizes: &'static [&'static str],
}

static ALLOWED_IMAGE_DOMAINS: Lazy<Vec<ImageDomain>> = Lazy::new(|| {
    vec![ImageDomain {
        hostname: TMDB_IMAGE_HOST,
        scheme: "https",
        path_pattern: Regex::new(r"^/t/p/[a-zA-Z0-9]+").expect("valid TMDB path pattern"),
        allowed_sizes: &["w92", "w154", "w185", "w342", "w500", "w780", "original"],
    }]
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Find the allowlist entry for a host
pub fn image_domain(hostname: &str) -> Option<&'static ImageDomain> {
    ALLOWED_IMAGE_DOMAINS.iter().find(|d| d.hostname == hostname)
}

/// Check the shape of a stored image path (`/abc.jpg`).
///
/// Rejects relative paths, traversal sequences and protocol-relative markers.
pub fn is_safe_image_path(path: &str) -> bool {
    path.starts_with('/') && !path.contains("..") && !path.contains("//")
}

/// Validate a full image URL against the allowlist entry for `hostname`.
pub fn validate_image_url(url: &str, hostname: &str) -> AppResult<String> {
    let domain = image_domain(hostname).ok_or_else(|| {
        AppError::validation(format!("{} is not an allowed image host", hostname))
            .with_code(codes::INVALID_IMAGE_HOSTNAME)
            .with_detail("providedUrl", url)
    })?;

    let parsed = Url::parse(url).map_err(|e| {
        AppError::validation("Invalid image URL format")
            .with_code(codes::INVALID_IMAGE_URL_FORMAT)
            .with_detail("providedUrl", url)
            .with_detail("originalError", e.to_string())
    })?;

    if parsed.scheme() != domain.scheme {
        return Err(AppError::validation(format!(
            "Invalid protocol for {}. Expected {}",
            hostname, domain.scheme
        ))
        .with_code(codes::INVALID_IMAGE_PROTOCOL)
        .with_detail("providedUrl", url)
        .with_detail("expectedProtocol", domain.scheme));
    }

    if parsed.host_str() != Some(domain.hostname) {
        return Err(AppError::validation(format!("Invalid hostname. Expected {}", hostname))
            .with_code(codes::INVALID_IMAGE_HOSTNAME)
            .with_detail("providedUrl", url)
            .with_detail("expectedHostname", domain.hostname));
    }

    if !domain.path_pattern.is_match(parsed.path()) {
        return Err(AppError::validation(format!("Invalid image path pattern for {}", hostname))
            .with_code(codes::INVALID_IMAGE_PATH)
            .with_detail("providedUrl", url)
            .with_detail("expectedPattern", domain.path_pattern.as_str()));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(
            AppError::validation("Image URL contains query parameters or hash fragments")
                .with_code(codes::INVALID_IMAGE_URL_COMPONENTS)
                .with_detail("providedUrl", url),
        );
    }

    Ok(url.to_string())
}

/// Build a TMDB image URL from a stored poster/backdrop path.
///
/// Returns `None` for a missing or unsafe path, an unknown size, or a URL
/// that fails validation.
pub fn build_tmdb_image_url(path: Option<&str>, size: &str) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;

    if !is_safe_image_path(path) {
        tracing::warn!("Invalid poster path format: {}", path);
        return None;
    }

    let domain = image_domain(TMDB_IMAGE_HOST)?;
    if !domain.allowed_sizes.contains(&size) {
        tracing::warn!("Invalid image size: {}", size);
        return None;
    }

    let url = format!("https://{}/t/p/{}{}", TMDB_IMAGE_HOST, size, path);
    match validate_image_url(&url, TMDB_IMAGE_HOST) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::error!(code = e.code(), "Failed to build TMDB image URL: {}", e);
            None
        }
    }
}

/// Poster URL at the default size
pub fn default_poster_url(path: Option<&str>) -> Option<String> {
    build_tmdb_image_url(path, DEFAULT_IMAGE_SIZE)
}

/// Image shown when no valid URL is available
pub fn fallback_image_url() -> &'static str {
    FALLBACK_IMAGE_URL
}

/// Check whether a URL points at an allowlisted host
pub fn is_allowed_image_domain(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|host| image_domain(host).is_some()))
        .unwrap_or(false)
}

/// Strip markup from alt text and cap its length
pub fn sanitize_image_alt_text(alt_text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(alt_text, "");
    let cleaned: String = without_tags
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_ALT_TEXT_LENGTH)
        .collect();
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tmdb_image_url() {
        assert_eq!(
            build_tmdb_image_url(Some("/abc123.jpg"), "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc123.jpg")
        );
        assert_eq!(
            build_tmdb_image_url(Some("/abc123.jpg"), "original").as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc123.jpg")
        );
    }

    #[test]
    fn test_build_rejects_unsafe_paths_and_sizes() {
        assert!(build_tmdb_image_url(None, "w500").is_none());
        assert!(build_tmdb_image_url(Some(""), "w500").is_none());
        assert!(build_tmdb_image_url(Some("abc.jpg"), "w500").is_none());
        assert!(build_tmdb_image_url(Some("/../etc/passwd"), "w500").is_none());
        assert!(build_tmdb_image_url(Some("//evil.com/x.jpg"), "w500").is_none());
        assert!(build_tmdb_image_url(Some("/abc.jpg"), "w9999").is_none());
    }

    #[test]
    fn test_validate_image_url_codes() {
        let err = validate_image_url("not a url", TMDB_IMAGE_HOST).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_URL_FORMAT);

        let err = validate_image_url("http://image.tmdb.org/t/p/w500/a.jpg", TMDB_IMAGE_HOST)
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_PROTOCOL);

        let err = validate_image_url("https://evil.example/t/p/w500/a.jpg", TMDB_IMAGE_HOST)
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_HOSTNAME);

        let err = validate_image_url("https://image.tmdb.org/x/a.jpg", TMDB_IMAGE_HOST).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_PATH);

        let err = validate_image_url("https://image.tmdb.org/t/p/w500/a.jpg?x=1", TMDB_IMAGE_HOST)
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_URL_COMPONENTS);

        let err = validate_image_url("https://image.tmdb.org/t/p/w500/a.jpg#top", TMDB_IMAGE_HOST)
            .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_IMAGE_URL_COMPONENTS);
    }

    #[test]
    fn test_allowed_domain() {
        assert!(is_allowed_image_domain("https://image.tmdb.org/t/p/w92/a.jpg"));
        assert!(!is_allowed_image_domain("https://example.com/a.jpg"));
        assert!(!is_allowed_image_domain("garbage"));
    }

    #[test]
    fn test_sanitize_alt_text() {
        assert_eq!(sanitize_image_alt_text("<b>Dune</b> <script>"), "Dune");
        assert_eq!(sanitize_image_alt_text("  Alien > Predator "), "Alien  Predator");

        let long = "x".repeat(150);
        assert_eq!(sanitize_image_alt_text(&long).len(), MAX_ALT_TEXT_LENGTH);
    }

    #[test]
    fn test_fallback_is_data_url() {
        assert!(fallback_image_url().starts_with("data:image/svg+xml;base64,"));
    }
}
