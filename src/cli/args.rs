//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_TOP_RATED_LIMIT};
use crate::domain::MovieUpdate;
use crate::types::PaginationParams;

/// Movie Catalog - Validated, instrumented access to the movie catalog
#[derive(Parser, Debug)]
#[command(name = "movie-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Query and edit movies
    Movies(MoviesArgs),

    /// Query and rename actors
    Actors(ActorsArgs),

    /// Show catalog statistics
    Stats,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Page selection shared by the list commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-indexed)
    #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER)]
    pub page: u64,

    /// Items per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,
}

impl From<PageArgs> for PaginationParams {
    fn from(args: PageArgs) -> Self {
        PaginationParams::new(args.page, args.page_size)
    }
}

/// Arguments for the movies command
#[derive(Parser, Debug)]
pub struct MoviesArgs {
    #[command(subcommand)]
    pub action: MoviesAction,
}

/// Movie actions
#[derive(Subcommand, Debug)]
pub enum MoviesAction {
    /// Highest rated movies
    Top {
        /// Number of movies (1-100)
        #[arg(short, long, default_value_t = DEFAULT_TOP_RATED_LIMIT)]
        limit: u64,
    },
    /// Movies in a genre
    Genre {
        /// Genre name (e.g., "Drama")
        name: String,
    },
    /// Science fiction movies
    SciFi,
    /// Show one or more movies by ID
    Show {
        /// Movie IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<i32>,
    },
    /// List movies page by page
    List(PageArgs),
    /// Update movie fields
    Update(MovieUpdateArgs),
}

/// Fields accepted by `movies update`
#[derive(Args, Debug)]
pub struct MovieUpdateArgs {
    /// Movie ID
    #[arg(allow_negative_numbers = true)]
    pub id: i32,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub overview: Option<String>,

    /// Release date (YYYY-MM-DD)
    #[arg(long)]
    pub release_date: Option<NaiveDate>,

    #[arg(long, allow_negative_numbers = true)]
    pub vote_average: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub vote_count: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub popularity: Option<f64>,

    /// Poster path (e.g., "/abc.jpg")
    #[arg(long, conflicts_with = "clear_poster")]
    pub poster_path: Option<String>,

    /// Backdrop path (e.g., "/abc.jpg")
    #[arg(long, conflicts_with = "clear_backdrop")]
    pub backdrop_path: Option<String>,

    /// Remove the stored poster path
    #[arg(long)]
    pub clear_poster: bool,

    /// Remove the stored backdrop path
    #[arg(long)]
    pub clear_backdrop: bool,
}

impl MovieUpdateArgs {
    /// Split into the target id and the update payload
    pub fn into_update(self) -> (i32, MovieUpdate) {
        let poster_path = if self.clear_poster {
            Some(None)
        } else {
            self.poster_path.map(Some)
        };
        let backdrop_path = if self.clear_backdrop {
            Some(None)
        } else {
            self.backdrop_path.map(Some)
        };

        let update = MovieUpdate {
            title: self.title,
            overview: self.overview,
            release_date: self.release_date,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            poster_path,
            backdrop_path,
        };

        (self.id, update)
    }
}

/// Arguments for the actors command
#[derive(Parser, Debug)]
pub struct ActorsArgs {
    #[command(subcommand)]
    pub action: ActorsAction,
}

/// Actor actions
#[derive(Subcommand, Debug)]
pub enum ActorsAction {
    /// All actors with their movies
    All,
    /// Show an actor with their movies
    Show {
        /// Actor ID
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
    /// List actors page by page
    List(PageArgs),
    /// Rename an actor
    Rename {
        /// Actor ID
        #[arg(allow_negative_numbers = true)]
        id: i32,
        /// New name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movies_update() {
        let cli = Cli::parse_from([
            "movie-catalog",
            "movies",
            "update",
            "42",
            "--vote-average",
            "8.5",
            "--clear-poster",
        ]);

        let Commands::Movies(MoviesArgs {
            action: MoviesAction::Update(args),
        }) = cli.command
        else {
            panic!("expected movies update");
        };

        let (id, update) = args.into_update();
        assert_eq!(id, 42);
        assert_eq!(update.vote_average, Some(8.5));
        assert_eq!(update.poster_path, Some(None));
        assert_eq!(update.backdrop_path, None);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::parse_from(["movie-catalog", "actors", "list"]);

        let Commands::Actors(ActorsArgs {
            action: ActorsAction::List(page),
        }) = cli.command
        else {
            panic!("expected actors list");
        };

        assert_eq!(PaginationParams::from(page), PaginationParams::default());
    }

    #[test]
    fn test_parse_top_limit() {
        let cli = Cli::parse_from(["movie-catalog", "-v", "movies", "top", "--limit", "5"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Movies(MoviesArgs {
                action: MoviesAction::Top { limit: 5 }
            })
        ));
    }
}
