//! Movie repository: movies with their genres, cast and directors.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::BoxFuture;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, Statement,
};

use super::base::{group_by_owner, load_linked_names, take_group, LinkedName};
use super::entities::{actor, director, genre, movie, movie_actor, movie_director, movie_genre};
use super::DbResult;
use crate::domain::{CastMember, CatalogStats, Director, Genre, Movie, MovieSummary, MovieUpdate};
use crate::infra::query::parallel::execute_parallel_queries;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Movie repository trait for dependency injection.
///
/// Every movie returned by a `find_*` method carries its relations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Find movie by ID
    async fn find_by_id(&self, id: i32) -> DbResult<Option<Movie>>;

    /// Find movies by ID, in the order requested. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: Vec<i32>) -> DbResult<Vec<Movie>>;

    /// Highest rated movies first
    async fn find_top_rated(&self, limit: u64) -> DbResult<Vec<Movie>>;

    /// Movies tagged with the named genre, highest rated first
    async fn find_by_genre(&self, genre_name: &str) -> DbResult<Vec<Movie>>;

    /// One page of movie summaries
    async fn find_page(&self, params: PaginationParams) -> DbResult<Vec<MovieSummary>>;

    /// Count all movies
    async fn count(&self) -> DbResult<u64>;

    /// Apply a partial update. `None` when the movie does not exist.
    async fn update(&self, id: i32, update: MovieUpdate) -> DbResult<Option<Movie>>;

    /// Aggregate rating figures over the whole catalog
    async fn stats(&self) -> DbResult<CatalogStats>;
}

/// Concrete implementation of MovieRepository
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach genres, cast and directors to the given rows
    async fn with_relations(&self, models: Vec<movie::Model>) -> DbResult<Vec<Movie>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let loads: Vec<BoxFuture<'_, DbResult<Vec<LinkedName>>>> = vec![
            Box::pin(load_linked_names::<genre::Entity, movie_genre::Entity, _>(
                &self.db,
                genre::Column::Id,
                genre::Column::Name,
                movie_genre::Column::MovieId,
                &ids,
            )),
            Box::pin(load_linked_names::<actor::Entity, movie_actor::Entity, _>(
                &self.db,
                actor::Column::Id,
                actor::Column::Name,
                movie_actor::Column::MovieId,
                &ids,
            )),
            Box::pin(load_linked_names::<director::Entity, movie_director::Entity, _>(
                &self.db,
                director::Column::Id,
                director::Column::Name,
                movie_director::Column::MovieId,
                &ids,
            )),
        ];

        let [genres, cast, directors]: [Vec<LinkedName>; 3] = execute_parallel_queries(loads)
            .await?
            .try_into()
            .map_err(|_| DbErr::Custom("relation loader returned an unexpected shape".to_string()))?;

        let mut genres = group_by_owner(genres, |r| r.owner_id, |r| Genre { id: r.id, name: r.name });
        let mut cast = group_by_owner(cast, |r| r.owner_id, |r| CastMember { id: r.id, name: r.name });
        let mut directors =
            group_by_owner(directors, |r| r.owner_id, |r| Director { id: r.id, name: r.name });

        Ok(models
            .into_iter()
            .map(|model| {
                let id = model.id;
                into_movie(
                    model,
                    take_group(&mut genres, id),
                    take_group(&mut cast, id),
                    take_group(&mut directors, id),
                )
            })
            .collect())
    }
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<Movie>> {
        let Some(model) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_relations(vec![model]).await?.pop())
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> DbResult<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = movie::Entity::find()
            .filter(movie::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        let mut by_id: HashMap<i32, Movie> = self
            .with_relations(models)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn find_top_rated(&self, limit: u64) -> DbResult<Vec<Movie>> {
        let models = movie::Entity::find()
            .order_by_desc(movie::Column::VoteAverage)
            .limit(limit)
            .all(&self.db)
            .await?;

        self.with_relations(models).await
    }

    async fn find_by_genre(&self, genre_name: &str) -> DbResult<Vec<Movie>> {
        let models = movie::Entity::find()
            .inner_join(movie_genre::Entity)
            .join(JoinType::InnerJoin, movie_genre::Relation::Genre.def())
            .filter(genre::Column::Name.eq(genre_name))
            .order_by_desc(movie::Column::VoteAverage)
            .all(&self.db)
            .await?;

        self.with_relations(models).await
    }

    async fn find_page(&self, params: PaginationParams) -> DbResult<Vec<MovieSummary>> {
        let rows = movie::Entity::find()
            .select_only()
            .columns([
                movie::Column::Id,
                movie::Column::Title,
                movie::Column::ReleaseDate,
                movie::Column::VoteAverage,
                movie::Column::PosterPath,
            ])
            .order_by_desc(movie::Column::VoteAverage)
            .order_by_asc(movie::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .into_model::<MovieSummaryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(MovieSummary::from).collect())
    }

    async fn count(&self) -> DbResult<u64> {
        movie::Entity::find().count(&self.db).await
    }

    async fn update(&self, id: i32, update: MovieUpdate) -> DbResult<Option<Movie>> {
        let Some(model) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = model.into();

        if let Some(title) = update.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(overview) = update.overview {
            active.overview = Set(overview.trim().to_string());
        }
        if let Some(release_date) = update.release_date {
            active.release_date = Set(release_date);
        }
        if let Some(vote_average) = update.vote_average {
            active.vote_average = Set(vote_average);
        }
        if let Some(vote_count) = update.vote_count {
            active.vote_count = Set(vote_count);
        }
        if let Some(popularity) = update.popularity {
            active.popularity = Set(popularity);
        }
        if let Some(poster_path) = update.poster_path {
            active.poster_path = Set(poster_path);
        }
        if let Some(backdrop_path) = update.backdrop_path {
            active.backdrop_path = Set(backdrop_path);
        }

        let model = active.update(&self.db).await?;

        Ok(self.with_relations(vec![model]).await?.pop())
    }

    async fn stats(&self) -> DbResult<CatalogStats> {
        let backend = self.db.get_database_backend();
        let row = StatsRow::find_by_statement(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS total_movies, \
                    AVG(vote_average) AS avg_rating, \
                    MAX(vote_average) AS max_rating, \
                    MIN(vote_average) AS min_rating \
             FROM movies"
                .to_string(),
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(CatalogStats::from).unwrap_or(CatalogStats {
            total_movies: 0,
            avg_rating: None,
            max_rating: None,
            min_rating: None,
        }))
    }
}

/// Projection used by paginated listings
#[derive(Debug, FromQueryResult)]
struct MovieSummaryRow {
    id: i32,
    title: String,
    release_date: NaiveDate,
    vote_average: f64,
    poster_path: Option<String>,
}

impl From<MovieSummaryRow> for MovieSummary {
    fn from(row: MovieSummaryRow) -> Self {
        MovieSummary {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
            vote_average: row.vote_average,
            poster_path: row.poster_path,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    total_movies: i64,
    avg_rating: Option<f64>,
    max_rating: Option<f64>,
    min_rating: Option<f64>,
}

impl From<StatsRow> for CatalogStats {
    fn from(row: StatsRow) -> Self {
        CatalogStats {
            total_movies: row.total_movies,
            avg_rating: row.avg_rating,
            max_rating: row.max_rating,
            min_rating: row.min_rating,
        }
    }
}

/// Convert database model plus loaded relations to domain entity
fn into_movie(
    model: movie::Model,
    genres: Vec<Genre>,
    actors: Vec<CastMember>,
    directors: Vec<Director>,
) -> Movie {
    Movie {
        id: model.id,
        title: model.title,
        overview: model.overview,
        release_date: model.release_date,
        popularity: model.popularity,
        vote_average: model.vote_average,
        vote_count: model.vote_count,
        poster_path: model.poster_path,
        backdrop_path: model.backdrop_path,
        genres,
        actors,
        directors,
    }
}
