//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.
//! Service commands print the full result envelope as JSON and fail with the
//! envelope's error.

pub mod actors;
pub mod migrate;
pub mod movies;
pub mod stats;

use serde::Serialize;

use crate::config::Config;
use crate::errors::{codes, AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;
use crate::types::ServiceResult;

/// Open the pool and build the service container
async fn connect_services(config: &Config) -> AppResult<Services> {
    let db = connect(config).await?;
    Ok(Services::from_connection(db.get_connection()))
}

/// Open the pool and check that the database answers
async fn connect(config: &Config) -> AppResult<Database> {
    let connection_error = |e: sea_orm::DbErr| {
        AppError::database("Unable to connect to the database")
            .with_code(codes::DATABASE_CONNECTION_ERROR)
            .with_detail("originalError", e.to_string())
    };

    let db = Database::connect_without_migrations(config)
        .await
        .map_err(connection_error)?;
    db.ping().await.map_err(connection_error)?;

    tracing::debug!("Database connection established");
    Ok(db)
}

/// Print the envelope and hand back its value
fn render<T: Serialize>(result: ServiceResult<T>) -> AppResult<T> {
    let json = serde_json::to_string_pretty(&result).map_err(|e| {
        AppError::database("Failed to render result")
            .with_code(codes::OPERATION_ERROR)
            .with_detail("originalError", e.to_string())
    })?;
    println!("{}", json);

    result.into_result()
}
