//! Result envelope returned by every service operation.

use std::fmt::Display;
use std::future::Future;

use serde::{Serialize, Serializer};

use crate::config::DEFAULT_ERROR_MESSAGE;
use crate::errors::{codes, AppError, AppResult};

/// Uniform success/failure wrapper.
///
/// Holds either the operation's value or an [`AppError`], never both. A
/// successful lookup that found nothing is `ServiceResult<Option<T>>` holding
/// `None`, which serializes as `{"data": null, "error": null, "success": true}`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ServiceResult<T> {
    outcome: Result<T, AppError>,
}

impl<T> ServiceResult<T> {
    pub fn success(data: T) -> Self {
        Self { outcome: Ok(data) }
    }

    pub fn failure(error: AppError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.outcome.as_ref().err()
    }

    pub fn into_data(self) -> Option<T> {
        self.outcome.ok()
    }

    pub fn into_error(self) -> Option<AppError> {
        self.outcome.err()
    }

    /// Convert into a plain result for `?` propagation
    pub fn into_result(self) -> AppResult<T> {
        self.outcome
    }

    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            outcome: self.outcome.map(f),
        }
    }

    /// Refine the error (e.g. attach context) without touching a success
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(AppError) -> AppError,
    {
        Self {
            outcome: self.outcome.map_err(f),
        }
    }
}

impl<T> From<AppResult<T>> for ServiceResult<T> {
    fn from(outcome: AppResult<T>) -> Self {
        Self { outcome }
    }
}

impl<T> From<ServiceResult<T>> for AppResult<T> {
    fn from(result: ServiceResult<T>) -> Self {
        result.outcome
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    data: Option<&'a T>,
    error: Option<&'a AppError>,
    success: bool,
}

impl<T: Serialize> Serialize for ServiceResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            data: self.data(),
            error: self.error(),
            success: self.is_success(),
        }
        .serialize(serializer)
    }
}

/// Run an operation and normalize its outcome with the default message and code.
///
/// See [`with_error_handling_as`].
pub async fn with_error_handling<T, E, F>(operation: F) -> ServiceResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    with_error_handling_as(DEFAULT_ERROR_MESSAGE, codes::OPERATION_ERROR, operation).await
}

/// Run an operation and normalize its outcome.
///
/// A failure is logged under `code` and converted into a database error whose
/// `details.originalError` carries the original message. Never propagates.
pub async fn with_error_handling_as<T, E, F>(message: &str, code: &str, operation: F) -> ServiceResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match operation.await {
        Ok(data) => ServiceResult::success(data),
        Err(err) => {
            tracing::error!(code, error = %err, "Error in {}", code);

            ServiceResult::failure(
                AppError::database(message)
                    .with_code(code)
                    .with_detail("originalError", err.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_success_wraps_value() {
        let result = with_error_handling(async { Ok::<_, String>(42) }).await;

        assert!(result.is_success());
        assert_eq!(result.data(), Some(&42));
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn test_empty_value_is_still_success() {
        let result = with_error_handling(async { Ok::<Option<i32>, String>(None) }).await;

        assert!(result.is_success());
        assert_eq!(result.data(), Some(&None));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"data": null, "error": null, "success": true})
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_database_error() {
        let result = with_error_handling(async { Err::<i32, _>("boom".to_string()) }).await;

        assert!(!result.is_success());
        assert!(result.data().is_none());

        let error = result.error().unwrap();
        assert_eq!(error.name(), "DatabaseError");
        assert_eq!(error.code(), codes::OPERATION_ERROR);
        assert_eq!(error.message(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(error.detail("originalError"), Some(&json!("boom")));
    }

    #[tokio::test]
    async fn test_custom_message_and_code() {
        let result = with_error_handling_as(
            "Failed to fetch actors",
            codes::FETCH_ACTORS_ERROR,
            async { Err::<(), _>("timeout") },
        )
        .await;

        let error = result.into_error().unwrap();
        assert_eq!(error.code(), codes::FETCH_ACTORS_ERROR);
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.message(), "Failed to fetch actors");
    }

    #[test]
    fn test_map_error_leaves_success_alone() {
        let ok: ServiceResult<i32> = ServiceResult::success(1);
        let ok = ok.map_error(|e| e.with_detail("movieId", 1));
        assert_eq!(ok.into_data(), Some(1));

        let failed: ServiceResult<i32> = ServiceResult::failure(AppError::database("x"));
        let failed = failed.map_error(|e| e.with_detail("movieId", 1));
        assert_eq!(failed.error().unwrap().detail("movieId"), Some(&json!(1)));
    }
}
