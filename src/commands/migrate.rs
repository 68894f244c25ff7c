//! Migrate command - Database migration management.

use sea_orm::DbErr;

use super::connect;
use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{codes, AppError, AppResult};

fn migration_error(e: DbErr) -> AppError {
    AppError::from(e).with_code(codes::MIGRATION_ERROR)
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    tracing::info!("Running migration command...");

    // Connect without auto-running migrations for manual control
    let db = connect(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await.map_err(migration_error)?;
            tracing::info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await.map_err(migration_error)?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            tracing::info!("Checking migration status...");
            let status = db.migration_status().await.map_err(migration_error)?;
            for (name, applied) in status {
                let status_str = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status_str);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await.map_err(migration_error)?;
            tracing::info!("Fresh migrations completed successfully");
        }
    }

    Ok(())
}
