//! Centralized error handling.
//!
//! Every failure the catalog reports is an [`AppError`] of one of three kinds.
//! The kind fixes the error name and its advisory HTTP-style status code; the
//! machine-readable code and the diagnostic details are chosen by whoever
//! constructs the error.

use sea_orm::DbErr;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Stable error codes shared by the services and their callers.
pub mod codes {
    // Defaults per kind
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";

    // Generic wrapper
    pub const OPERATION_ERROR: &str = "OPERATION_ERROR";
    pub const DATABASE_CONNECTION_ERROR: &str = "DATABASE_CONNECTION_ERROR";
    pub const MIGRATION_ERROR: &str = "MIGRATION_ERROR";

    // Validation helpers
    pub const MISSING_REQUIRED_PARAM: &str = "MISSING_REQUIRED_PARAM";
    pub const INVALID_NUMERIC_VALUE: &str = "INVALID_NUMERIC_VALUE";
    pub const VALUE_OUT_OF_RANGE: &str = "VALUE_OUT_OF_RANGE";
    pub const INVALID_BATCH_SIZE: &str = "INVALID_BATCH_SIZE";

    // Movies
    pub const INVALID_MOVIE_ID: &str = "INVALID_MOVIE_ID";
    pub const INVALID_MOVIE_TITLE: &str = "INVALID_MOVIE_TITLE";
    pub const INVALID_MOVIE_OVERVIEW: &str = "INVALID_MOVIE_OVERVIEW";
    pub const INVALID_IMAGE_PATH_FORMAT: &str = "INVALID_IMAGE_PATH_FORMAT";
    pub const EMPTY_MOVIE_UPDATE: &str = "EMPTY_MOVIE_UPDATE";
    pub const FETCH_MOVIE_BY_ID_ERROR: &str = "FETCH_MOVIE_BY_ID_ERROR";
    pub const FETCH_MOVIES_BY_IDS_ERROR: &str = "FETCH_MOVIES_BY_IDS_ERROR";
    pub const FETCH_TOP_RATED_MOVIES_ERROR: &str = "FETCH_TOP_RATED_MOVIES_ERROR";
    pub const FETCH_MOVIES_BY_GENRE_ERROR: &str = "FETCH_MOVIES_BY_GENRE_ERROR";
    pub const FETCH_MOVIES_PAGE_ERROR: &str = "FETCH_MOVIES_PAGE_ERROR";
    pub const UPDATE_MOVIE_ERROR: &str = "UPDATE_MOVIE_ERROR";
    pub const FETCH_CATALOG_STATS_ERROR: &str = "FETCH_CATALOG_STATS_ERROR";

    // Actors
    pub const INVALID_ACTOR_ID: &str = "INVALID_ACTOR_ID";
    pub const INVALID_ACTOR_NAME: &str = "INVALID_ACTOR_NAME";
    pub const FETCH_ACTORS_ERROR: &str = "FETCH_ACTORS_ERROR";
    pub const FETCH_ACTOR_ERROR: &str = "FETCH_ACTOR_ERROR";
    pub const FETCH_ACTORS_PAGE_ERROR: &str = "FETCH_ACTORS_PAGE_ERROR";
    pub const UPDATE_ACTOR_ERROR: &str = "UPDATE_ACTOR_ERROR";

    // Image URLs
    pub const INVALID_IMAGE_URL_FORMAT: &str = "INVALID_IMAGE_URL_FORMAT";
    pub const INVALID_IMAGE_PROTOCOL: &str = "INVALID_IMAGE_PROTOCOL";
    pub const INVALID_IMAGE_HOSTNAME: &str = "INVALID_IMAGE_HOSTNAME";
    pub const INVALID_IMAGE_PATH: &str = "INVALID_IMAGE_PATH";
    pub const INVALID_IMAGE_URL_COMPONENTS: &str = "INVALID_IMAGE_URL_COMPONENTS";
}

/// Failure category. Determines the error name and status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Persistence or infrastructure failure
    Database,
    /// Malformed or out-of-range caller input
    Validation,
    /// Entity legitimately absent
    NotFound,
}

impl ErrorKind {
    /// Name exposed on the wire
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Database => "DatabaseError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
        }
    }

    /// Advisory status code for transports built on top of the services
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Database => 500,
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
        }
    }

    /// Code used when the constructor is not given one
    pub fn default_code(self) -> &'static str {
        match self {
            ErrorKind::Database => codes::DATABASE_ERROR,
            ErrorKind::Validation => codes::VALIDATION_ERROR,
            ErrorKind::NotFound => codes::NOT_FOUND,
        }
    }
}

/// Application error.
///
/// Built with one of the kind constructors and optionally refined with
/// [`AppError::with_code`] and [`AppError::with_detail`]. The status code
/// always follows the kind.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    code: String,
    details: Option<Map<String, Value>>,
}

/// Wire shape of an error
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    name: &'static str,
    message: &'a str,
    code: &'a str,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Map<String, Value>>,
}

impl Serialize for AppError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorBody {
            name: self.name(),
            message: &self.message,
            code: &self.code,
            status_code: self.status_code(),
            details: self.details.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Convenience constructors
impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: kind.default_code().to_string(),
            details: None,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Replace the default code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Replace the whole details bag
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a single diagnostic entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }

    /// Look up one entry of the details bag
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|details| details.get(key))
    }

    /// Message to show to an end user.
    ///
    /// Falls back to a text keyed off the code when the message is empty.
    pub fn display_message(&self) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }

        match self.code.as_str() {
            codes::DATABASE_CONNECTION_ERROR => {
                "Unable to connect to the database. Please check your connection and try again."
            }
            codes::FETCH_TOP_RATED_MOVIES_ERROR => {
                "Failed to load top-rated movies. Please try again later."
            }
            codes::FETCH_MOVIES_BY_GENRE_ERROR => {
                "Failed to load movies for this genre. Please try again later."
            }
            codes::VALIDATION_ERROR => {
                "Invalid request parameters. Please check your input and try again."
            }
            _ => "An unexpected error occurred. Please try again.",
        }
        .to_string()
    }

    /// Emit a structured log record for this error
    pub fn log(&self, context: Option<&Value>) {
        tracing::error!(
            name = self.name(),
            code = %self.code,
            status_code = self.status_code(),
            details = ?self.details,
            context = ?context,
            "Application error: {}",
            self.message
        );
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::database("A database error occurred").with_detail("originalError", err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_codes_and_status() {
        let db = AppError::database("boom");
        assert_eq!(db.name(), "DatabaseError");
        assert_eq!(db.code(), codes::DATABASE_ERROR);
        assert_eq!(db.status_code(), 500);

        let invalid = AppError::validation("bad input");
        assert_eq!(invalid.name(), "ValidationError");
        assert_eq!(invalid.code(), codes::VALIDATION_ERROR);
        assert_eq!(invalid.status_code(), 400);

        let missing = AppError::not_found("no such movie");
        assert_eq!(missing.name(), "NotFoundError");
        assert_eq!(missing.code(), codes::NOT_FOUND);
        assert_eq!(missing.status_code(), 404);
        assert!(missing.details().is_none());
    }

    #[test]
    fn test_code_override_keeps_status() {
        let err = AppError::validation("Movie ID must be a positive number")
            .with_code(codes::INVALID_MOVIE_ID)
            .with_detail("providedId", -3);

        assert_eq!(err.code(), codes::INVALID_MOVIE_ID);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.detail("providedId"), Some(&json!(-3)));
    }

    #[test]
    fn test_serializes_wire_shape() {
        let err = AppError::not_found("Movie 7 not found");
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "NotFoundError",
                "message": "Movie 7 not found",
                "code": "NOT_FOUND",
                "statusCode": 404
            })
        );
    }

    #[test]
    fn test_display_message_fallback() {
        let err = AppError::database("").with_code(codes::FETCH_TOP_RATED_MOVIES_ERROR);
        assert_eq!(
            err.display_message(),
            "Failed to load top-rated movies. Please try again later."
        );

        let unknown = AppError::database("").with_code("SOMETHING_ELSE");
        assert_eq!(
            unknown.display_message(),
            "An unexpected error occurred. Please try again."
        );

        let explicit = AppError::database("Failed to fetch actors");
        assert_eq!(explicit.display_message(), "Failed to fetch actors");
    }

    #[test]
    fn test_from_db_err() {
        let err = AppError::from(DbErr::Custom("connection reset".into()));
        assert_eq!(err.code(), codes::DATABASE_ERROR);
        let original = err.detail("originalError").and_then(Value::as_str).unwrap();
        assert!(original.contains("connection reset"));
    }

    #[test]
    fn test_ok_or_not_found() {
        let found: Option<i32> = Some(1);
        assert_eq!(found.ok_or_not_found("missing").unwrap(), 1);

        let missing: Option<i32> = None;
        assert_eq!(missing.ok_or_not_found("missing").unwrap_err().status_code(), 404);
    }
}
