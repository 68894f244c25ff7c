//! Movie records and the partial update payload.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{DEFAULT_IMAGE_SIZE, MAX_VOTE_AVERAGE, MIN_VOTE_AVERAGE};
use crate::errors::{codes, AppError, AppResult};
use crate::utils::image::{build_tmdb_image_url, is_safe_image_path, sanitize_image_alt_text};
use crate::utils::validation::{validate_non_blank, validate_numeric_range};

/// Genre attached to a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Director credited on a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: i32,
    pub name: String,
}

/// Actor credited on a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i32,
    pub name: String,
}

/// Movie with its genres, cast and directors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub actors: Vec<CastMember>,
    pub directors: Vec<Director>,
}

impl Movie {
    /// Poster URL at the given TMDB size, if the stored path is valid
    pub fn poster_url(&self, size: &str) -> Option<String> {
        build_tmdb_image_url(self.poster_path.as_deref(), size)
    }

    /// Backdrop URL at the default size
    pub fn backdrop_url(&self) -> Option<String> {
        build_tmdb_image_url(self.backdrop_path.as_deref(), DEFAULT_IMAGE_SIZE)
    }

    /// Alt text for the poster image
    pub fn poster_alt_text(&self) -> String {
        sanitize_image_alt_text(&self.title)
    }

    pub fn has_genre(&self, name: &str) -> bool {
        self.genres.iter().any(|g| g.name == name)
    }
}

/// Row shown in paginated listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub poster_path: Option<String>,
}

/// Partial movie update.
///
/// `None` leaves a field untouched. For the image paths, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_or_null")]
    pub poster_path: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_or_null")]
    pub backdrop_path: Option<Option<String>>,
}

/// A key that is present, even as `null`, becomes `Some(_)`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.overview.is_none()
            && self.release_date.is_none()
            && self.vote_average.is_none()
            && self.vote_count.is_none()
            && self.popularity.is_none()
            && self.poster_path.is_none()
            && self.backdrop_path.is_none()
    }

    /// Check every provided field, stopping at the first failure
    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::validation("Movie update contains no fields")
                .with_code(codes::EMPTY_MOVIE_UPDATE));
        }

        if let Some(title) = &self.title {
            validate_non_blank(title, codes::INVALID_MOVIE_TITLE, "Movie title cannot be empty", "title")?;
        }
        if let Some(overview) = &self.overview {
            validate_non_blank(
                overview,
                codes::INVALID_MOVIE_OVERVIEW,
                "Movie overview cannot be empty",
                "overview",
            )?;
        }
        if let Some(vote_average) = self.vote_average {
            validate_numeric_range(vote_average, MIN_VOTE_AVERAGE, MAX_VOTE_AVERAGE, "voteAverage")?;
        }
        if let Some(vote_count) = self.vote_count {
            validate_numeric_range(f64::from(vote_count), 0.0, f64::from(i32::MAX), "voteCount")?;
        }
        if let Some(popularity) = self.popularity {
            validate_numeric_range(popularity, 0.0, f64::MAX, "popularity")?;
        }

        validate_image_path(self.poster_path.as_ref(), "posterPath")?;
        validate_image_path(self.backdrop_path.as_ref(), "backdropPath")
    }
}

fn validate_image_path(path: Option<&Option<String>>, param_name: &str) -> AppResult<()> {
    match path {
        Some(Some(p)) if !is_safe_image_path(p) => Err(AppError::validation(format!(
            "{} must start with '/' and must not contain '..' or '//'",
            param_name
        ))
        .with_code(codes::INVALID_IMAGE_PATH_FORMAT)
        .with_detail("paramName", param_name)
        .with_detail("providedValue", p.as_str())),
        _ => Ok(()),
    }
}
