//! Utility functions and helpers.

pub mod image;
pub mod validation;

pub use image::{
    build_tmdb_image_url, default_poster_url, fallback_image_url, is_allowed_image_domain,
    is_safe_image_path, sanitize_image_alt_text, validate_image_url,
};
pub use validation::{
    validate_non_blank, validate_numeric_range, validate_positive_id, validate_required_params,
};
