//! Movie rating entity model and DTOs.

use cinerate_core::rating::format_timestamp;
use cinerate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movie_ratings` table.
#[derive(Debug, Clone, FromRow)]
pub struct Rating {
    pub id: DbId,
    pub movie_id: DbId,
    pub score: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a rating. The score range is checked by the service
/// layer, not by deserialisation, so out-of-range scores get a specific
/// error message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub score: i64,
}

/// Rating as rendered in responses, with `created_at` as ISO-8601 `...Z`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingItem {
    pub id: DbId,
    pub movie_id: DbId,
    pub score: i32,
    pub created_at: String,
}

impl From<Rating> for RatingItem {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            movie_id: rating.movie_id,
            score: rating.score,
            created_at: format_timestamp(&rating.created_at),
        }
    }
}
