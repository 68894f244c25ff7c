//! Application services layer - Use cases over the catalog.
//!
//! Services validate their input, run the repository call under query
//! instrumentation and hand back a [`ServiceResult`]. They depend on the
//! [`UnitOfWork`](crate::infra::UnitOfWork) abstraction for repository access.

mod actor_service;
pub mod container;
mod movie_service;

use std::future::Future;

use crate::infra::{with_query_performance, DbResult, Timed};
use crate::types::{with_error_handling_as, ServiceResult};

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use actor_service::{ActorManager, ActorService};
pub use movie_service::{MovieManager, MovieService};

/// Run a repository call timed under `query_name`, normalizing a failure
/// into a database error with the given message and code.
pub(crate) async fn run_query<T, F>(
    query_name: &str,
    message: &str,
    code: &str,
    query: F,
) -> ServiceResult<T>
where
    F: Future<Output = DbResult<T>>,
{
    with_error_handling_as(message, code, async {
        with_query_performance(query_name, query)
            .await
            .map(Timed::into_data)
    })
    .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::domain::{Genre, Movie};
    use crate::infra::{
        ActorRepository, MockActorRepository, MockMovieRepository, MovieRepository, UnitOfWork,
    };

    /// UnitOfWork wrapping repository mocks
    pub struct TestUnitOfWork {
        movie_repo: Arc<MockMovieRepository>,
        actor_repo: Arc<MockActorRepository>,
    }

    impl TestUnitOfWork {
        pub fn new(movie_repo: MockMovieRepository, actor_repo: MockActorRepository) -> Self {
            Self {
                movie_repo: Arc::new(movie_repo),
                actor_repo: Arc::new(actor_repo),
            }
        }

        pub fn with_movies(movie_repo: MockMovieRepository) -> Self {
            Self::new(movie_repo, MockActorRepository::new())
        }

        pub fn with_actors(actor_repo: MockActorRepository) -> Self {
            Self::new(MockMovieRepository::new(), actor_repo)
        }
    }

    impl UnitOfWork for TestUnitOfWork {
        fn movies(&self) -> Arc<dyn MovieRepository> {
            self.movie_repo.clone()
        }

        fn actors(&self) -> Arc<dyn ActorRepository> {
            self.actor_repo.clone()
        }
    }

    pub fn create_test_movie(id: i32, vote_average: f64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: "Test overview".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            popularity: 10.0,
            vote_average,
            vote_count: 100,
            poster_path: Some(format!("/poster{}.jpg", id)),
            backdrop_path: None,
            genres: vec![Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            }],
            actors: vec![],
            directors: vec![],
        }
    }
}
