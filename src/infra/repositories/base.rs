//! Query helpers shared by the catalog stores.
//!
//! Relations are loaded with one projected join query per relation, keyed by
//! the owning row's id, and grouped in memory afterwards.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Related,
};

use super::DbResult;

/// `{id, name}` row reached from an owner through a join table
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub(crate) struct LinkedName {
    pub owner_id: i32,
    pub id: i32,
    pub name: String,
}

/// Load the `{id, name}` rows of entity `E` linked to `owner_ids` through
/// join entity `J`, ordered by name.
pub(crate) async fn load_linked_names<E, J, C>(
    db: &C,
    id_column: E::Column,
    name_column: E::Column,
    owner_column: J::Column,
    owner_ids: &[i32],
) -> DbResult<Vec<LinkedName>>
where
    E: EntityTrait + Related<J>,
    E::Column: Copy,
    J: EntityTrait,
    J::Column: Copy,
    C: ConnectionTrait,
{
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }

    E::find()
        .select_only()
        .column_as(owner_column, "owner_id")
        .column(id_column)
        .column(name_column)
        .inner_join(J::default())
        .filter(owner_column.is_in(owner_ids.iter().copied()))
        .order_by_asc(name_column)
        .into_model::<LinkedName>()
        .all(db)
        .await
}

/// Group rows by owner id, preserving row order within each group
pub(crate) fn group_by_owner<R, T, K, F>(rows: Vec<R>, owner: K, convert: F) -> HashMap<i32, Vec<T>>
where
    K: Fn(&R) -> i32,
    F: Fn(R) -> T,
{
    let mut grouped: HashMap<i32, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(owner(&row)).or_default().push(convert(row));
    }
    grouped
}

/// Take an owner's group out of the map, empty if it has none
pub(crate) fn take_group<T>(groups: &mut HashMap<i32, Vec<T>>, owner_id: i32) -> Vec<T> {
    groups.remove(&owner_id).unwrap_or_default()
}
