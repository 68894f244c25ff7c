//! Migration: Create the catalog tables.
//!
//! Ids come from the upstream movie database, so none of the primary keys
//! auto-increment.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(named_table(Genres::Table, Genres::Id, Genres::Name)).await?;
        manager.create_table(named_table(Actors::Table, Actors::Id, Actors::Name)).await?;
        manager
            .create_table(named_table(Directors::Table, Directors::Id, Directors::Name))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::Overview).text().not_null())
                    .col(ColumnDef::new(Movies::ReleaseDate).date().not_null())
                    .col(ColumnDef::new(Movies::Popularity).double().not_null())
                    .col(ColumnDef::new(Movies::VoteAverage).double().not_null())
                    .col(ColumnDef::new(Movies::VoteCount).integer().not_null())
                    .col(ColumnDef::new(Movies::PosterPath).string().null())
                    .col(ColumnDef::new(Movies::BackdropPath).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(join_table(
                MovieGenres::Table,
                MovieGenres::MovieId,
                MovieGenres::GenreId,
                Genres::Table,
                Genres::Id,
            ))
            .await?;
        manager
            .create_table(join_table(
                MovieActors::Table,
                MovieActors::MovieId,
                MovieActors::ActorId,
                Actors::Table,
                Actors::Id,
            ))
            .await?;
        manager
            .create_table(join_table(
                MovieDirectors::Table,
                MovieDirectors::MovieId,
                MovieDirectors::DirectorId,
                Directors::Table,
                Directors::Id,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Join tables first, they reference everything else
        manager
            .drop_table(Table::drop().table(MovieDirectors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieActors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieGenres::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(Directors::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Actors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await
    }
}

/// `{id, name}` lookup table
fn named_table<T: Iden + 'static>(table: T, id: T, name: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(id).integer().not_null().primary_key())
        .col(ColumnDef::new(name).string().not_null())
        .to_owned()
}

/// Join table from movies to `target_table` with a composite primary key
fn join_table<J: Iden + Clone + 'static, T: Iden + Clone + 'static>(
    table: J,
    movie_id: J,
    target_id: J,
    target_table: T,
    target_pk: T,
) -> TableCreateStatement {
    Table::create()
        .table(table.clone())
        .if_not_exists()
        .col(ColumnDef::new(movie_id.clone()).integer().not_null())
        .col(ColumnDef::new(target_id.clone()).integer().not_null())
        .primary_key(Index::create().col(movie_id.clone()).col(target_id.clone()))
        .foreign_key(
            ForeignKey::create()
                .from(table.clone(), movie_id)
                .to(Movies::Table, Movies::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, target_id)
                .to(target_table, target_pk)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
    Title,
    Overview,
    ReleaseDate,
    Popularity,
    VoteAverage,
    VoteCount,
    PosterPath,
    BackdropPath,
}

#[derive(Iden, Clone)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
enum Actors {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
enum Directors {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone)]
enum MovieGenres {
    Table,
    MovieId,
    GenreId,
}

#[derive(Iden, Clone)]
enum MovieActors {
    Table,
    MovieId,
    ActorId,
}

#[derive(Iden, Clone)]
enum MovieDirectors {
    Table,
    MovieId,
    DirectorId,
}
