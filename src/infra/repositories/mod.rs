//! Repository layer - Data access abstraction
//!
//! Repositories return raw `DbErr` failures; the service layer decides how a
//! failure is reported.

mod actor_repository;
mod base;
pub(crate) mod entities;
mod movie_repository;

pub use actor_repository::{ActorRepository, ActorStore};
pub use movie_repository::{MovieRepository, MovieStore};

/// Result of a repository call
pub type DbResult<T> = Result<T, sea_orm::DbErr>;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use actor_repository::MockActorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use movie_repository::MockMovieRepository;
