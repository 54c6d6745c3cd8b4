//! Genre entity model and DTOs.

use cinerate_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table, also the `{id, name}` shape embedded in
/// movie items.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// A genre joined through `genres_movie`, tagged with the movie it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct MovieGenre {
    pub movie_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a genre.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}
