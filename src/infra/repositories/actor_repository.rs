//! Actor repository with filmography loading.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::base::{group_by_owner, take_group};
use super::entities::{actor, movie, movie_actor};
use super::DbResult;
use crate::domain::{Actor, ActorMovie, ActorWithMovies};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Actor repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// All actors ordered by name, each with their movies
    async fn find_all_with_movies(&self) -> DbResult<Vec<ActorWithMovies>>;

    /// Find actor by ID with their movies
    async fn find_by_id_with_movies(&self, id: i32) -> DbResult<Option<ActorWithMovies>>;

    /// One page of actors ordered by name
    async fn find_page(&self, params: PaginationParams) -> DbResult<Vec<Actor>>;

    /// Count all actors
    async fn count(&self) -> DbResult<u64>;

    /// Rename an actor. `None` when the actor does not exist.
    async fn update(&self, id: i32, name: String) -> DbResult<Option<Actor>>;
}

/// Concrete implementation of ActorRepository
pub struct ActorStore {
    db: DatabaseConnection,
}

impl ActorStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_movies(&self, models: Vec<actor::Model>) -> DbResult<Vec<ActorWithMovies>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let rows = movie::Entity::find()
            .select_only()
            .column_as(movie_actor::Column::ActorId, "owner_id")
            .columns([
                movie::Column::Id,
                movie::Column::Title,
                movie::Column::ReleaseDate,
                movie::Column::VoteAverage,
            ])
            .inner_join(movie_actor::Entity)
            .filter(movie_actor::Column::ActorId.is_in(ids))
            .order_by_desc(movie::Column::ReleaseDate)
            .into_model::<FilmographyRow>()
            .all(&self.db)
            .await?;

        let mut filmographies = group_by_owner(rows, |r| r.owner_id, ActorMovie::from);

        Ok(models
            .into_iter()
            .map(|model| ActorWithMovies {
                movies: take_group(&mut filmographies, model.id),
                id: model.id,
                name: model.name,
            })
            .collect())
    }
}

#[async_trait]
impl ActorRepository for ActorStore {
    async fn find_all_with_movies(&self) -> DbResult<Vec<ActorWithMovies>> {
        let models = actor::Entity::find()
            .order_by_asc(actor::Column::Name)
            .all(&self.db)
            .await?;

        self.with_movies(models).await
    }

    async fn find_by_id_with_movies(&self, id: i32) -> DbResult<Option<ActorWithMovies>> {
        let Some(model) = actor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_movies(vec![model]).await?.pop())
    }

    async fn find_page(&self, params: PaginationParams) -> DbResult<Vec<Actor>> {
        let models = actor::Entity::find()
            .order_by_asc(actor::Column::Name)
            .order_by_asc(actor::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Actor::from).collect())
    }

    async fn count(&self) -> DbResult<u64> {
        actor::Entity::find().count(&self.db).await
    }

    async fn update(&self, id: i32, name: String) -> DbResult<Option<Actor>> {
        let Some(model) = actor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: actor::ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await?;
        Ok(Some(Actor::from(model)))
    }
}

/// Movie columns of a filmography entry, keyed by actor
#[derive(Debug, FromQueryResult)]
struct FilmographyRow {
    owner_id: i32,
    id: i32,
    title: String,
    release_date: NaiveDate,
    vote_average: f64,
}

impl From<FilmographyRow> for ActorMovie {
    fn from(row: FilmographyRow) -> Self {
        ActorMovie {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
            vote_average: row.vote_average,
        }
    }
}
