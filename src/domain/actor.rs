//! Actor records and the rename payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{codes, AppResult};
use crate::utils::validation::validate_non_blank;

/// Actor without relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i32,
    pub name: String,
}

/// Movie entry in an actor's filmography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorMovie {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
}

/// Actor with the movies they appear in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorWithMovies {
    pub id: i32,
    pub name: String,
    pub movies: Vec<ActorMovie>,
}

/// Actor update data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorUpdate {
    pub name: String,
}

impl ActorUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_non_blank(&self.name, codes::INVALID_ACTOR_NAME, "Actor name cannot be empty", "name")
    }

    /// Name as it is stored
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}
