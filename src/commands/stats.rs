//! Stats command - Catalog statistics.

use super::{connect_services, render};
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the stats command
pub async fn execute(config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;

    let stats = render(services.movies().get_catalog_stats().await)?;
    tracing::debug!(total_movies = stats.total_movies, "Catalog statistics fetched");

    Ok(())
}
