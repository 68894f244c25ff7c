//! Actor service - Actor lookups and renames.

use async_trait::async_trait;
use std::sync::Arc;

use super::run_query;
use crate::domain::{Actor, ActorUpdate, ActorWithMovies};
use crate::errors::codes;
use crate::infra::query::parallel;
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams, ServiceResult};
use crate::utils::validation::validate_positive_id;

/// Actor service trait for dependency injection.
#[async_trait]
pub trait ActorService: Send + Sync {
    /// All actors ordered by name, each with their movies
    async fn get_all_actors(&self) -> ServiceResult<Vec<ActorWithMovies>>;

    /// Get an actor with their movies
    async fn get_actor_by_id(&self, id: i32) -> ServiceResult<Option<ActorWithMovies>>;

    /// One page of actors ordered by name
    async fn list_actors(&self, params: PaginationParams) -> ServiceResult<Paginated<Actor>>;

    /// Rename an actor; the name is trimmed before it is stored
    async fn update_actor(&self, id: i32, update: ActorUpdate) -> ServiceResult<Option<Actor>>;
}

/// Concrete implementation of ActorService using Unit of Work.
pub struct ActorManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ActorManager<U> {
    /// Create new actor service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ActorService for ActorManager<U> {
    async fn get_all_actors(&self) -> ServiceResult<Vec<ActorWithMovies>> {
        let repo = self.uow.actors();
        run_query(
            "actors.find_all_with_movies",
            "Failed to fetch actors",
            codes::FETCH_ACTORS_ERROR,
            repo.find_all_with_movies(),
        )
        .await
    }

    async fn get_actor_by_id(&self, id: i32) -> ServiceResult<Option<ActorWithMovies>> {
        if let Err(e) = validate_positive_id(id, codes::INVALID_ACTOR_ID, "Actor ID") {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.actors();
        run_query(
            "actors.find_by_id_with_movies",
            "Failed to fetch actor",
            codes::FETCH_ACTOR_ERROR,
            repo.find_by_id_with_movies(id),
        )
        .await
        .map_error(|e| e.with_detail("actorId", id))
    }

    async fn list_actors(&self, params: PaginationParams) -> ServiceResult<Paginated<Actor>> {
        if let Err(e) = params.validate() {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.actors();
        run_query(
            "actors.find_page",
            "Failed to fetch actors",
            codes::FETCH_ACTORS_PAGE_ERROR,
            async {
                let (total, rows) = parallel::join2(repo.count(), repo.find_page(params)).await?;
                Ok::<_, sea_orm::DbErr>(Paginated::new(rows, params.page, params.limit(), total))
            },
        )
        .await
    }

    async fn update_actor(&self, id: i32, update: ActorUpdate) -> ServiceResult<Option<Actor>> {
        if let Err(e) = validate_positive_id(id, codes::INVALID_ACTOR_ID, "Actor ID")
            .and_then(|_| update.validate())
        {
            return ServiceResult::failure(e);
        }

        let repo = self.uow.actors();
        let name = update.trimmed_name().to_string();
        run_query(
            "actors.update",
            "Failed to update actor",
            codes::UPDATE_ACTOR_ERROR,
            repo.update(id, name),
        )
        .await
        .map_error(|e| e.with_detail("actorId", id).with_detail("providedName", update.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActorMovie;
    use crate::infra::MockActorRepository;
    use crate::services::test_support::TestUnitOfWork;
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use sea_orm::DbErr;
    use serde_json::json;

    fn service(repo: MockActorRepository) -> ActorManager<TestUnitOfWork> {
        ActorManager::new(Arc::new(TestUnitOfWork::with_actors(repo)))
    }

    fn create_test_actor(id: i32, name: &str) -> ActorWithMovies {
        ActorWithMovies {
            id,
            name: name.to_string(),
            movies: vec![ActorMovie {
                id: 329865,
                title: "Arrival".to_string(),
                release_date: NaiveDate::from_ymd_opt(2016, 11, 10).unwrap(),
                vote_average: 7.6,
            }],
        }
    }

    #[tokio::test]
    async fn test_get_all_actors_success() {
        let mut repo = MockActorRepository::new();
        repo.expect_find_all_with_movies().times(1).returning(|| {
            Ok(vec![
                create_test_actor(1, "Amy Adams"),
                create_test_actor(2, "Jeremy Renner"),
            ])
        });

        let actors = service(repo).get_all_actors().await.into_data().unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].movies[0].title, "Arrival");
    }

    #[tokio::test]
    async fn test_get_all_actors_failure() {
        let mut repo = MockActorRepository::new();
        repo.expect_find_all_with_movies()
            .returning(|| Err(DbErr::Custom("pool timed out".to_string())));

        let result = service(repo).get_all_actors().await;
        let body = serde_json::to_value(&result).unwrap();

        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], json!(null));
        assert_eq!(body["error"]["name"], json!("DatabaseError"));
        assert_eq!(body["error"]["code"], json!(codes::FETCH_ACTORS_ERROR));
        assert_eq!(body["error"]["statusCode"], json!(500));
        assert_eq!(body["error"]["message"], json!("Failed to fetch actors"));
    }

    #[tokio::test]
    async fn test_get_actor_by_id() {
        let mut repo = MockActorRepository::new();
        repo.expect_find_by_id_with_movies()
            .with(eq(1))
            .returning(|id| Ok(Some(create_test_actor(id, "Amy Adams"))));
        repo.expect_find_by_id_with_movies()
            .with(eq(2))
            .returning(|_| Ok(None));
        let service = service(repo);

        let found = service.get_actor_by_id(1).await.into_data().flatten().unwrap();
        assert_eq!(found.name, "Amy Adams");

        let missing = service.get_actor_by_id(2).await;
        assert!(missing.is_success());
        assert_eq!(missing.data(), Some(&None));
    }

    #[tokio::test]
    async fn test_invalid_actor_id_skips_repository() {
        let mut repo = MockActorRepository::new();
        repo.expect_find_by_id_with_movies().times(0);

        let error = service(repo).get_actor_by_id(-4).await.into_error().unwrap();
        assert_eq!(error.code(), codes::INVALID_ACTOR_ID);
        assert_eq!(error.message(), "Actor ID must be a positive number");
    }

    #[tokio::test]
    async fn test_update_actor_trims_name() {
        let mut repo = MockActorRepository::new();
        repo.expect_update()
            .with(eq(3), eq("Keanu Reeves".to_string()))
            .times(1)
            .returning(|id, name| Ok(Some(Actor { id, name })));

        let actor = service(repo)
            .update_actor(3, ActorUpdate::new("  Keanu Reeves  "))
            .await
            .into_data()
            .flatten()
            .unwrap();

        assert_eq!(actor.name, "Keanu Reeves");
    }

    #[tokio::test]
    async fn test_update_actor_blank_name() {
        let mut repo = MockActorRepository::new();
        repo.expect_update().times(0);

        let error = service(repo)
            .update_actor(3, ActorUpdate::new("   "))
            .await
            .into_error()
            .unwrap();

        assert_eq!(error.code(), codes::INVALID_ACTOR_NAME);
        assert_eq!(error.status_code(), 400);
    }

    #[tokio::test]
    async fn test_update_actor_failure_carries_id() {
        let mut repo = MockActorRepository::new();
        repo.expect_update()
            .returning(|_, _| Err(DbErr::Custom("deadlock detected".to_string())));

        let error = service(repo)
            .update_actor(9, ActorUpdate::new("Name"))
            .await
            .into_error()
            .unwrap();

        assert_eq!(error.code(), codes::UPDATE_ACTOR_ERROR);
        assert_eq!(error.detail("actorId"), Some(&json!(9)));
    }

    #[tokio::test]
    async fn test_list_actors() {
        let mut repo = MockActorRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_find_page().returning(|_| {
            Ok(vec![Actor {
                id: 1,
                name: "Amy Adams".to_string(),
            }])
        });

        let page = service(repo)
            .list_actors(PaginationParams::new(1, 2))
            .await
            .into_data()
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total_pages, 2);
    }
}
