//! Domain layer - Catalog records and update payloads
//!
//! Plain data owned by the persistence layer. The services only validate and
//! wrap access to these types; the ORM models live in `infra`.

pub mod actor;
pub mod movie;
pub mod stats;

pub use actor::{Actor, ActorMovie, ActorUpdate, ActorWithMovies};
pub use movie::{CastMember, Director, Genre, Movie, MovieSummary, MovieUpdate};
pub use stats::CatalogStats;
