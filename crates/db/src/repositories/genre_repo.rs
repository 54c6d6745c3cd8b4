//! Repository for the `genres` table and genre lookups through
//! `genres_movie`.

use cinerate_core::types::DbId;
use sqlx::PgConnection;

use crate::models::genre::{CreateGenre, Genre, MovieGenre};

const COLUMNS: &str = "id, name";

/// Provides create/read operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Insert a new genre, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateGenre) -> Result<Genre, sqlx::Error> {
        let query = format!("INSERT INTO genres (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.name)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Genre names are not unique in storage; the lowest id wins.
    pub async fn find_by_name(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Resolve a set of ids. Unknown ids are silently absent from the
    /// result; each existing genre appears once however often it was asked for.
    pub async fn find_by_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Genre>(&query)
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
    }

    /// Fetch the genres of many movies in one round trip, ordered by
    /// movie then genre id.
    pub async fn list_for_movies(
        conn: &mut PgConnection,
        movie_ids: &[DbId],
    ) -> Result<Vec<MovieGenre>, sqlx::Error> {
        sqlx::query_as::<_, MovieGenre>(
            "SELECT gm.movie_id, g.id, g.name \
             FROM genres_movie gm \
             JOIN genres g ON g.id = gm.genre_id \
             WHERE gm.movie_id = ANY($1) \
             ORDER BY gm.movie_id, g.id",
        )
        .bind(movie_ids)
        .fetch_all(&mut *conn)
        .await
    }
}
