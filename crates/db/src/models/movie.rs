//! Movie entity model, list/detail item shapes and DTOs.

use cinerate_core::movie::{is_valid_release_year, is_valid_title};
use cinerate_core::patch::Patch;
use cinerate_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::director::DirectorRef;
use crate::models::genre::Genre;

/// One movie joined to its director and its rating aggregate.
///
/// `ratings_count` and `average_rating` are computed at read time from
/// `movie_ratings`; they are never stored.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: DbId,
    pub title: String,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    pub director_id: DbId,
    pub director_name: String,
    pub ratings_count: i64,
    pub average_rating: Option<f64>,
}

/// The materialized movie returned by list, get, create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieItem {
    pub id: DbId,
    pub title: String,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    pub director: DirectorRef,
    pub genres: Vec<Genre>,
    pub ratings_count: i64,
    /// `None` exactly when `ratings_count` is zero; otherwise rounded to
    /// two decimals.
    pub average_rating: Option<f64>,
}

impl MovieItem {
    pub fn from_row(row: MovieRow, genres: Vec<Genre>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_year: row.release_year,
            cast: row.cast,
            director: DirectorRef {
                id: row.director_id,
                name: row.director_name,
            },
            genres,
            ratings_count: row.ratings_count,
            average_rating: row.average_rating,
        }
    }
}

/// Conjunctive list filters. Text filters are raw user terms; the
/// repository turns them into escaped `ILIKE` patterns.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
}

/// One page of movies plus the unpaginated match count.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub items: Vec<MovieItem>,
    pub total: i64,
}

/// DTO for creating a movie.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(range(min = 1800, max = 3000))]
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    #[validate(range(min = 1))]
    pub director_id: DbId,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
}

/// DTO for a partial movie update. See [`Patch`] for the absent / null /
/// value distinction.
///
/// `title` and `director_id` cannot be cleared, so `null` is rejected for
/// them. A `null` `genre_ids` leaves the links alone; `[]` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub release_year: Patch<i32>,
    #[serde(default)]
    pub cast: Patch<String>,
    #[serde(default)]
    pub director_id: Patch<DbId>,
    #[serde(default)]
    pub genre_ids: Patch<Vec<DbId>>,
}

impl UpdateMovie {
    /// The genre set to install, if the update touches genres at all.
    pub fn genre_ids(&self) -> Option<&[DbId]> {
        self.genre_ids.value().map(Vec::as_slice)
    }

    /// `true` if any scalar column of `movies` is written.
    pub fn touches_columns(&self) -> bool {
        self.title.is_present()
            || self.release_year.is_present()
            || self.cast.is_present()
            || self.director_id.is_present()
    }
}

impl Validate for UpdateMovie {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.title {
            Patch::Null => errors.add("title", ValidationError::new("required")),
            Patch::Value(title) if !is_valid_title(title) => {
                errors.add("title", ValidationError::new("length"))
            }
            _ => {}
        }

        if let Patch::Value(year) = self.release_year {
            if !is_valid_release_year(year) {
                errors.add("release_year", ValidationError::new("range"));
            }
        }

        match self.director_id {
            Patch::Null => errors.add("director_id", ValidationError::new("required")),
            Patch::Value(id) if id < 1 => errors.add("director_id", ValidationError::new("range")),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
