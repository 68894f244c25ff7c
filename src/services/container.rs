//! Service Container - Centralized service access.
//!
//! Services are built once around a shared [`Persistence`] hub and handed
//! out as trait objects.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{ActorManager, ActorService, MovieManager, MovieService};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get movie service
    fn movies(&self) -> Arc<dyn MovieService>;

    /// Get actor service
    fn actors(&self) -> Arc<dyn ActorService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    movie_service: Arc<dyn MovieService>,
    actor_service: Arc<dyn ActorService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(movie_service: Arc<dyn MovieService>, actor_service: Arc<dyn ActorService>) -> Self {
        Self {
            movie_service,
            actor_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            movie_service: Arc::new(MovieManager::new(uow.clone())),
            actor_service: Arc::new(ActorManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn movies(&self) -> Arc<dyn MovieService> {
        self.movie_service.clone()
    }

    fn actors(&self) -> Arc<dyn ActorService> {
        self.actor_service.clone()
    }
}
