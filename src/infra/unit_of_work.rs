//! Unit of Work: one hub owning the shared connection.
//!
//! Services reach every repository through a [`UnitOfWork`], so the
//! connection is injected once and tests can swap in mocks.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{ActorRepository, ActorStore, MovieRepository, MovieStore};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get movie repository
    fn movies(&self) -> Arc<dyn MovieRepository>;

    /// Get actor repository
    fn actors(&self) -> Arc<dyn ActorRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    movie_repo: Arc<MovieStore>,
    actor_repo: Arc<ActorStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance around a shared connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            movie_repo: Arc::new(MovieStore::new(db.clone())),
            actor_repo: Arc::new(ActorStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movie_repo.clone()
    }

    fn actors(&self) -> Arc<dyn ActorRepository> {
        self.actor_repo.clone()
    }
}
