//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, pool settings and migrations
//! - Repositories over the catalog tables
//! - Query timing, parallel and batched execution
//! - Unit of Work owning the shared connection

pub mod db;
pub mod query;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use query::{
    validate_query_performance, validate_query_performance_against, with_query_performance,
    PerformanceAssessment, QueryPerformance, Timed,
};
pub use repositories::{ActorRepository, ActorStore, DbResult, MovieRepository, MovieStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockActorRepository, MockMovieRepository};
