//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod actor;
pub mod director;
pub mod genre;
pub mod movie;
pub mod movie_actor;
pub mod movie_director;
pub mod movie_genre;
