//! Movies command - Movie lookups, listings and edits.

use super::{connect_services, render};
use crate::cli::args::{MoviesAction, MoviesArgs};
use crate::config::Config;
use crate::errors::{AppResult, OptionExt};
use crate::services::ServiceContainer;

/// Execute the movies command
pub async fn execute(args: MoviesArgs, config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;
    let movies = services.movies();

    match args.action {
        MoviesAction::Top { limit } => {
            render(movies.get_top_rated_movies(limit).await)?;
        }
        MoviesAction::Genre { name } => {
            render(movies.get_movies_by_genre(&name).await)?;
        }
        MoviesAction::SciFi => {
            render(movies.get_sci_fi_movies().await)?;
        }
        MoviesAction::Show { ids } => {
            if let [id] = ids.as_slice() {
                let id = *id;
                render(movies.get_movie_by_id(id).await)?
                    .ok_or_not_found(format!("Movie {} not found", id))?;
            } else {
                let requested = ids.len();
                let found = render(movies.get_movies_by_ids(ids).await)?;
                if found.len() < requested {
                    tracing::warn!(requested, found = found.len(), "Some movies were not found");
                }
            }
        }
        MoviesAction::List(page) => {
            render(movies.list_movies(page.into()).await)?;
        }
        MoviesAction::Update(update_args) => {
            let (id, update) = update_args.into_update();
            let movie = render(movies.update_movie(id, update).await)?
                .ok_or_not_found(format!("Movie {} not found", id))?;
            tracing::info!(movie_id = movie.id, "Movie updated");
        }
    }

    Ok(())
}
