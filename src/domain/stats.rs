//! Aggregate figures over the movie table.

use serde::{Deserialize, Serialize};

/// Catalog statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_movies: i64,
    pub avg_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_rating: Option<f64>,
}
