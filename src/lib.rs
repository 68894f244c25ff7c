//! Movie Catalog - Validated, instrumented access to a movie database
//!
//! Every catalog operation validates its input, runs its query under timing
//! instrumentation and reports through a uniform [`ServiceResult`] envelope
//! carrying either the data or a classified [`AppError`].
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Catalog records and update payloads
//! - **services**: Movie and actor use cases
//! - **infra**: Database, repositories, query instrumentation
//! - **types**: Result envelope and pagination
//! - **utils**: Input validation and image URL checks
//! - **errors**: Error taxonomy
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Ten highest rated movies
//! cargo run -- movies top --limit 10
//!
//! # Rename an actor
//! cargo run -- actors rename 1245 "Scarlett Johansson"
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Actor, ActorWithMovies, Movie, MovieSummary};
pub use errors::{AppError, AppResult, ErrorKind};
pub use types::{with_error_handling, with_error_handling_as, ServiceResult};
