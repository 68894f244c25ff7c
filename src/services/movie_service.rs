//! Movie service - Movie lookups, listings and edits.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::run_query;
use crate::config::{MAX_TOP_RATED_LIMIT, MOVIE_FETCH_BATCH_SIZE, SCI_FI_GENRE};
use crate::domain::{CatalogStats, Movie, MovieSummary, MovieUpdate};
use crate::errors::{codes, AppError, AppResult};
use crate::infra::query::{batch, parallel};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams, ServiceResult};
use crate::utils::validation::{validate_numeric_range, validate_positive_id, validate_required_params};

/// Movie service trait for dependency injection.
///
/// Every operation reports through a [`ServiceResult`]; a lookup that finds
/// nothing is a success holding `None`.
#[async_trait]
pub trait MovieService: Send + Sync {
    /// Get a movie with its genres, cast and directors
    async fn get_movie_by_id(&self, id: i32) -> ServiceResult<Option<Movie>>;

    /// Get several movies at once, in the order requested
    async fn get_movies_by_ids(&self, ids: Vec<i32>) -> ServiceResult<Vec<Movie>>;

    /// Highest rated movies, `limit` in `1..=100`
    async fn get_top_rated_movies(&self, limit: u64) -> ServiceResult<Vec<Movie>>;

    /// Movies in the named genre, highest rated first
    async fn get_movies_by_genre(&self, genre_name: &str) -> ServiceResult<Vec<Movie>>;

    /// Science fiction movies, highest rated first
    async fn get_sci_fi_movies(&self) -> ServiceResult<Vec<Movie>>;

    /// One page of movie summaries
    async fn list_movies(&self, params: PaginationParams) -> ServiceResult<Paginated<MovieSummary>>;

    /// Apply a partial update
    async fn update_movie(&self, id: i32, update: MovieUpdate) -> ServiceResult<Option<Movie>>;

    /// Count and rating figures over the catalog
    async fn get_catalog_stats(&self) -> ServiceResult<CatalogStats>;
}

/// Concrete implementation of MovieService using Unit of Work.
pub struct MovieManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MovieManager<U> {
    /// Create new movie service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn validate_movie_ids(ids: &[i32]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::validation("At least one movie ID is required")
            .with_code(codes::MISSING_REQUIRED_PARAM)
            .with_detail("missingParam", "ids"));
    }

    ids.iter()
        .try_for_each(|&id| validate_positive_id(id, codes::INVALID_MOVIE_ID, "Movie ID"))
}

#[async_trait]
impl<U: UnitOfWork> MovieService for MovieManager<U> {
    async fn get_movie_by_id(&self, id: i32) -> ServiceResult<Option<Movie>> {
        if let Err(e) = validate_positive_id(id, codes::INVALID_MOVIE_ID, "Movie ID") {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.movies();
        run_query(
            "movies.find_by_id",
            "Failed to fetch movie",
            codes::FETCH_MOVIE_BY_ID_ERROR,
            repo.find_by_id(id),
        )
        .await
        .map_error(|e| e.with_detail("movieId", id))
    }

    async fn get_movies_by_ids(&self, ids: Vec<i32>) -> ServiceResult<Vec<Movie>> {
        if let Err(e) = validate_movie_ids(&ids) {
            return ServiceResult::failure(e);
        }
        let batch_size = match batch::batch_size(MOVIE_FETCH_BATCH_SIZE) {
            Ok(size) => size,
            Err(e) => return ServiceResult::failure(e),
        };

        let repo = self.uow.movies();
        let requested = ids.len();
        run_query(
            "movies.find_by_ids",
            "Failed to fetch movies",
            codes::FETCH_MOVIES_BY_IDS_ERROR,
            batch::batch_process(ids, batch_size, |chunk| repo.find_by_ids(chunk)),
        )
        .await
        .map_error(|e| e.with_detail("requestedCount", requested))
    }

    async fn get_top_rated_movies(&self, limit: u64) -> ServiceResult<Vec<Movie>> {
        if let Err(e) = validate_numeric_range(limit as f64, 1.0, MAX_TOP_RATED_LIMIT as f64, "limit") {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.movies();
        run_query(
            "movies.find_top_rated",
            "Failed to fetch top rated movies",
            codes::FETCH_TOP_RATED_MOVIES_ERROR,
            repo.find_top_rated(limit),
        )
        .await
    }

    async fn get_movies_by_genre(&self, genre_name: &str) -> ServiceResult<Vec<Movie>> {
        if let Err(e) = validate_required_params([("genre", json!(genre_name))]) {
            return ServiceResult::failure(e);
        }

        let genre_name = genre_name.trim();
        let repo = self.uow.movies();
        run_query(
            "movies.find_by_genre",
            "Failed to fetch movies by genre",
            codes::FETCH_MOVIES_BY_GENRE_ERROR,
            repo.find_by_genre(genre_name),
        )
        .await
        .map_error(|e| e.with_detail("genre", genre_name))
    }

    async fn get_sci_fi_movies(&self) -> ServiceResult<Vec<Movie>> {
        self.get_movies_by_genre(SCI_FI_GENRE).await
    }

    async fn list_movies(&self, params: PaginationParams) -> ServiceResult<Paginated<MovieSummary>> {
        if let Err(e) = params.validate() {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.movies();
        run_query(
            "movies.find_page",
            "Failed to fetch movies",
            codes::FETCH_MOVIES_PAGE_ERROR,
            async {
                let (total, rows) = parallel::join2(repo.count(), repo.find_page(params)).await?;
                Ok::<_, sea_orm::DbErr>(Paginated::new(rows, params.page, params.limit(), total))
            },
        )
        .await
    }

    async fn update_movie(&self, id: i32, update: MovieUpdate) -> ServiceResult<Option<Movie>> {
        if let Err(e) = validate_positive_id(id, codes::INVALID_MOVIE_ID, "Movie ID")
            .and_then(|_| update.validate())
        {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.movies();
        run_query(
            "movies.update",
            "Failed to update movie",
            codes::UPDATE_MOVIE_ERROR,
            repo.update(id, update),
        )
        .await
        .map_error(|e| e.with_detail("movieId", id))
    }

    async fn get_catalog_stats(&self) -> ServiceResult<CatalogStats> {
        let repo = self.uow.movies();
        run_query(
            "movies.stats",
            "Failed to fetch catalog statistics",
            codes::FETCH_CATALOG_STATS_ERROR,
            repo.stats(),
        )
        .await
    }
}
