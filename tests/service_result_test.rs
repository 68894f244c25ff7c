//! Error taxonomy, result envelope and validation tests.

use serde_json::{json, Value};

use movie_catalog::errors::{codes, AppError, ErrorKind};
use movie_catalog::types::{with_error_handling, with_error_handling_as, ServiceResult};
use movie_catalog::utils::validation::{validate_numeric_range, validate_required_params};

#[test]
fn test_error_kinds_fix_status_codes() {
    let cases = [
        (AppError::database("db down"), "DatabaseError", 500),
        (AppError::validation("bad"), "ValidationError", 400),
        (AppError::not_found("gone"), "NotFoundError", 404),
    ];

    for (error, name, status) in cases {
        assert_eq!(error.name(), name);
        assert_eq!(error.status_code(), status);
    }

    let custom = AppError::not_found("Movie 7 not found").with_code("MOVIE_NOT_FOUND");
    assert_eq!(custom.kind(), ErrorKind::NotFound);
    assert_eq!(custom.code(), "MOVIE_NOT_FOUND");
    assert_eq!(custom.status_code(), 404);
}

#[test]
fn test_error_serializes_camel_case() {
    let error = AppError::validation("Actor name cannot be empty")
        .with_code(codes::INVALID_ACTOR_NAME)
        .with_detail("providedName", "");

    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({
            "name": "ValidationError",
            "message": "Actor name cannot be empty",
            "code": "INVALID_ACTOR_NAME",
            "statusCode": 400,
            "details": {"providedName": ""}
        })
    );

    let bare = serde_json::to_value(AppError::database("x")).unwrap();
    assert!(bare.get("details").is_none());
}

#[tokio::test]
async fn test_with_error_handling_success_and_failure() {
    let ok = with_error_handling(async { Ok::<_, String>(vec!["Dune", "Arrival"]) }).await;
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        json!({"data": ["Dune", "Arrival"], "error": null, "success": true})
    );

    let failed = with_error_handling(async { Err::<Vec<&str>, _>("socket closed") }).await;
    let body = serde_json::to_value(&failed).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["name"], json!("DatabaseError"));
    assert_eq!(body["error"]["code"], json!(codes::OPERATION_ERROR));
    assert_eq!(body["error"]["details"]["originalError"], json!("socket closed"));
}

#[tokio::test]
async fn test_success_flag_matches_error() {
    let results: Vec<ServiceResult<i32>> = vec![
        with_error_handling_as("m", "C", async { Ok::<_, String>(1) }).await,
        with_error_handling_as("m", "C", async { Err::<i32, _>("e") }).await,
        ServiceResult::failure(AppError::not_found("none")),
    ];

    for result in results {
        assert_eq!(result.is_success(), result.error().is_none());
        assert_eq!(result.is_success(), result.data().is_some());
    }
}

#[test]
fn test_required_params_short_circuit_in_order() {
    let err = validate_required_params([
        ("movieId", json!(12)),
        ("title", Value::Null),
        ("genre", json!("")),
    ])
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.code(), codes::MISSING_REQUIRED_PARAM);
    assert_eq!(err.detail("missingParam"), Some(&json!("title")));
}

#[test]
fn test_numeric_range_inclusive_bounds() {
    assert!(validate_numeric_range(1.0, 1.0, 100.0, "limit").is_ok());
    assert!(validate_numeric_range(100.0, 1.0, 100.0, "limit").is_ok());

    let err = validate_numeric_range(100.5, 1.0, 100.0, "limit").unwrap_err();
    assert_eq!(err.code(), codes::VALUE_OUT_OF_RANGE);
    assert_eq!(err.detail("min"), Some(&json!(1.0)));
    assert_eq!(err.detail("providedValue"), Some(&json!(100.5)));
}
