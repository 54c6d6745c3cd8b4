//! Repository for the `movie_ratings` table.

use cinerate_core::types::DbId;
use sqlx::PgConnection;

use crate::models::rating::Rating;

const COLUMNS: &str = "id, movie_id, score, created_at";

/// Provides insert/list operations for ratings. Ratings are never updated
/// and are only deleted through the movie cascade.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a rating. The caller has already checked that the movie
    /// exists and the score is in range; `id` and `created_at` are assigned
    /// by the database.
    pub async fn create(
        conn: &mut PgConnection,
        movie_id: DbId,
        score: i32,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_ratings (movie_id, score)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(movie_id)
            .bind(score)
            .fetch_one(&mut *conn)
            .await
    }

    /// List a movie's ratings, most recent first.
    pub async fn list_for_movie(
        conn: &mut PgConnection,
        movie_id: DbId,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movie_ratings
             WHERE movie_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(movie_id)
            .fetch_all(&mut *conn)
            .await
    }
}
