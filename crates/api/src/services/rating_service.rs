use cinerate_core::error::CoreError;
use cinerate_core::rating::{is_valid_score, MAX_SCORE, MIN_SCORE};
use cinerate_core::types::DbId;
use cinerate_db::error::is_foreign_key_violation;
use cinerate_db::models::rating::RatingItem;
use cinerate_db::repositories::{MovieRepo, RatingRepo};
use cinerate_db::DbPool;
use sqlx::PgConnection;

use super::MOVIE_ENTITY;
use crate::error::{AppError, AppResult};

/// Rating operations, scoped to an existing movie.
pub struct RatingService;

impl RatingService {
    /// Record a score for a movie.
    ///
    /// The movie is checked first, so a missing movie is reported as
    /// not-found even when the score is also out of range.
    pub async fn create(pool: &DbPool, movie_id: DbId, score: i64) -> AppResult<RatingItem> {
        let mut tx = pool.begin().await?;
        ensure_movie(&mut *tx, movie_id).await?;

        if !is_valid_score(score) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Score must be an integer between {MIN_SCORE} and {MAX_SCORE}"
            ))));
        }
        // In range, so it fits the column type.
        let score = score as i32;

        let rating = match RatingRepo::create(&mut *tx, movie_id, score).await {
            Ok(rating) => rating,
            // The movie was deleted between the check and the insert.
            Err(err) if is_foreign_key_violation(&err) => return Err(not_found(movie_id)),
            Err(err) => return Err(err.into()),
        };
        tx.commit().await?;

        tracing::info!(movie_id, rating_id = rating.id, score, "Created rating");
        Ok(rating.into())
    }

    /// All ratings of a movie, newest first.
    pub async fn list(pool: &DbPool, movie_id: DbId) -> AppResult<Vec<RatingItem>> {
        let mut tx = pool.begin().await?;
        ensure_movie(&mut *tx, movie_id).await?;
        let ratings = RatingRepo::list_for_movie(&mut *tx, movie_id).await?;
        tx.commit().await?;

        Ok(ratings.into_iter().map(RatingItem::from).collect())
    }
}

async fn ensure_movie(conn: &mut PgConnection, movie_id: DbId) -> AppResult<()> {
    if MovieRepo::exists(conn, movie_id).await? {
        Ok(())
    } else {
        Err(not_found(movie_id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: MOVIE_ENTITY,
        id,
    })
}
