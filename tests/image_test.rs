//! Image URL allowlist tests.

use movie_catalog::errors::codes;
use movie_catalog::utils::image::{
    build_tmdb_image_url, default_poster_url, is_allowed_image_domain, validate_image_url,
};

#[test]
fn test_build_url_for_valid_path() {
    assert_eq!(
        build_tmdb_image_url(Some("/abc.jpg"), "w500").as_deref(),
        Some("https://image.tmdb.org/t/p/w500/abc.jpg")
    );
    assert_eq!(
        default_poster_url(Some("/abc.jpg")).as_deref(),
        Some("https://image.tmdb.org/t/p/w500/abc.jpg")
    );
}

#[test]
fn test_unsafe_paths_yield_none() {
    for path in ["/../../secret", "//attacker.example/x.jpg", "abc.jpg", ""] {
        assert!(build_tmdb_image_url(Some(path), "w500").is_none(), "{}", path);
    }
}

#[test]
fn test_validate_rejects_foreign_hosts() {
    assert!(!is_allowed_image_domain("https://cdn.example.com/t/p/w500/a.jpg"));

    let err = validate_image_url("https://cdn.example.com/t/p/w500/a.jpg", "cdn.example.com")
        .unwrap_err();
    assert_eq!(err.code(), codes::INVALID_IMAGE_HOSTNAME);
    assert_eq!(err.status_code(), 400);
}
