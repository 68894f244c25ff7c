//! Actors command - Actor lookups and renames.

use super::{connect_services, render};
use crate::cli::args::{ActorsAction, ActorsArgs};
use crate::config::Config;
use crate::domain::ActorUpdate;
use crate::errors::{AppResult, OptionExt};
use crate::services::ServiceContainer;

/// Execute the actors command
pub async fn execute(args: ActorsArgs, config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;
    let actors = services.actors();

    match args.action {
        ActorsAction::All => {
            render(actors.get_all_actors().await)?;
        }
        ActorsAction::Show { id } => {
            render(actors.get_actor_by_id(id).await)?
                .ok_or_not_found(format!("Actor {} not found", id))?;
        }
        ActorsAction::List(page) => {
            render(actors.list_actors(page.into()).await)?;
        }
        ActorsAction::Rename { id, name } => {
            let actor = render(actors.update_actor(id, ActorUpdate::new(name)).await)?
                .ok_or_not_found(format!("Actor {} not found", id))?;
            tracing::info!(actor_id = actor.id, "Actor renamed");
        }
    }

    Ok(())
}
