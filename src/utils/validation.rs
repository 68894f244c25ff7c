//! Precondition checks run before any query is issued.
//!
//! All helpers are pure and return the first failure as a validation error.

use serde_json::Value;

use crate::errors::{codes, AppError, AppResult};

/// Check that every parameter is present.
///
/// Parameters are checked in the order given. The first one that is `null`
/// or a whitespace-only string fails with `MISSING_REQUIRED_PARAM` naming the
/// key in `details.missingParam`.
pub fn validate_required_params<'a, I>(params: I) -> AppResult<()>
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    for (key, value) in params {
        let missing = match &value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };

        if missing {
            return Err(
                AppError::validation(format!("Missing required parameter: {}", key))
                    .with_code(codes::MISSING_REQUIRED_PARAM)
                    .with_detail("missingParam", key)
                    .with_detail("providedValue", value),
            );
        }
    }

    Ok(())
}

/// Check that `value` is a finite number within `min..=max`.
pub fn validate_numeric_range(value: f64, min: f64, max: f64, param_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(
            AppError::validation(format!("{} must be a valid number", param_name))
                .with_code(codes::INVALID_NUMERIC_VALUE)
                .with_detail("paramName", param_name)
                .with_detail("providedValue", value.to_string()),
        );
    }

    if value < min || value > max {
        return Err(
            AppError::validation(format!("{} must be between {} and {}", param_name, min, max))
                .with_code(codes::VALUE_OUT_OF_RANGE)
                .with_detail("paramName", param_name)
                .with_detail("providedValue", value)
                .with_detail("min", min)
                .with_detail("max", max),
        );
    }

    Ok(())
}

/// Check that an entity id is positive.
///
/// `code` is entity specific (e.g. `INVALID_MOVIE_ID`), `label` names the id
/// in the message.
pub fn validate_positive_id(id: i32, code: &str, label: &str) -> AppResult<()> {
    if id <= 0 {
        return Err(
            AppError::validation(format!("{} must be a positive number", label))
                .with_code(code)
                .with_detail("providedId", id),
        );
    }

    Ok(())
}

/// Check that a text field has visible content
pub fn validate_non_blank(value: &str, code: &str, message: &str, param_name: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message)
            .with_code(code)
            .with_detail("paramName", param_name)
            .with_detail("providedValue", value));
    }

    Ok(())
}
