//! Repository for the `movies` table, its `genres_movie` links and the
//! per-movie rating aggregate.

use std::collections::{BTreeSet, HashMap};

use cinerate_core::movie::text_filter;
use cinerate_core::pagination::PageRequest;
use cinerate_core::patch::Patch;
use cinerate_core::types::DbId;
use sqlx::PgConnection;

use crate::error::RepoError;
use crate::models::genre::Genre;
use crate::models::movie::{CreateMovie, MovieFilter, MovieItem, MoviePage, MovieRow, UpdateMovie};
use crate::repositories::{DirectorRepo, GenreRepo};

/// Movie columns joined to the director name and the rating aggregate.
///
/// The lateral subquery always yields one row, so `ratings_count` is 0 and
/// `average_rating` is NULL for unrated movies.
const ITEM_SELECT: &str = "\
    SELECT m.id, m.title, m.release_year, m.\"cast\", \
           d.id AS director_id, d.name AS director_name, \
           agg.ratings_count, agg.average_rating \
    FROM movies m \
    JOIN directors d ON d.id = m.director_id \
    LEFT JOIN LATERAL ( \
        SELECT COUNT(*) AS ratings_count, \
               ROUND(AVG(r.score)::NUMERIC, 2)::FLOAT8 AS average_rating \
        FROM movie_ratings r \
        WHERE r.movie_id = m.id \
    ) agg ON TRUE";

/// Conjunctive list filters. `$1` title pattern, `$2` release year,
/// `$3` genre pattern; a NULL parameter disables its filter.
const FILTER_CLAUSE: &str = "\
    WHERE ($1::TEXT IS NULL OR m.title ILIKE $1) \
      AND ($2::INTEGER IS NULL OR m.release_year = $2) \
      AND ($3::TEXT IS NULL OR EXISTS ( \
          SELECT 1 FROM genres_movie gm \
          JOIN genres g ON g.id = gm.genre_id \
          WHERE gm.movie_id = m.id AND g.name ILIKE $3))";

/// Provides list/read/write operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// List one page of movies matching every supplied filter, ordered by
    /// id, together with the total number of matches.
    pub async fn list(
        conn: &mut PgConnection,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> Result<MoviePage, sqlx::Error> {
        let title = text_filter(filter.title.as_deref());
        let genre = text_filter(filter.genre.as_deref());

        let count_query = format!(
            "SELECT COUNT(*) FROM movies m \
             JOIN directors d ON d.id = m.director_id \
             {FILTER_CLAUSE}"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&title)
            .bind(filter.release_year)
            .bind(&genre)
            .fetch_one(&mut *conn)
            .await?;

        let query = format!("{ITEM_SELECT} {FILTER_CLAUSE} ORDER BY m.id LIMIT $4 OFFSET $5");
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(&title)
            .bind(filter.release_year)
            .bind(&genre)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(
            total,
            returned = rows.len(),
            page = page.page,
            page_size = page.page_size,
            "Listed movies"
        );

        let items = Self::attach_genres(conn, rows).await?;
        Ok(MoviePage { items, total })
    }

    /// Find a movie by id, fully materialized.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<MovieItem>, sqlx::Error> {
        let query = format!("{ITEM_SELECT} WHERE m.id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => {
                let mut items = Self::attach_genres(conn, vec![row]).await?;
                Ok(items.pop())
            }
            None => Ok(None),
        }
    }

    /// Id of the first movie with exactly this title.
    pub async fn find_id_by_title(
        conn: &mut PgConnection,
        title: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM movies WHERE title = $1 ORDER BY id LIMIT 1")
            .bind(title)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Insert a movie and its genre links.
    ///
    /// The director and every genre id are resolved before anything is
    /// written; an unresolved reference fails the whole create.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateMovie,
    ) -> Result<MovieItem, RepoError> {
        Self::check_director(conn, input.director_id).await?;
        Self::check_genres(conn, &input.genre_ids).await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO movies (title, release_year, \"cast\", director_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(input.release_year)
        .bind(&input.cast)
        .bind(input.director_id)
        .fetch_one(&mut *conn)
        .await?;

        if !input.genre_ids.is_empty() {
            Self::replace_genres(conn, id, &input.genre_ids).await?;
        }

        tracing::info!(movie_id = id, director_id = input.director_id, "Created movie");

        let item = Self::find_by_id(conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(item)
    }

    /// Apply a partial update. Only present fields are written; a present
    /// `genre_ids` replaces the genre set.
    ///
    /// Returns `Ok(None)` if the movie does not exist. The row is locked
    /// for the rest of the unit of work so a concurrent delete waits.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<MovieItem>, RepoError> {
        let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        if let Patch::Value(director_id) = input.director_id {
            Self::check_director(conn, director_id).await?;
        }
        if let Some(genre_ids) = input.genre_ids() {
            Self::check_genres(conn, genre_ids).await?;
        }

        if input.touches_columns() {
            sqlx::query(
                "UPDATE movies SET \
                    title = COALESCE($2, title), \
                    release_year = CASE WHEN $3 THEN $4 ELSE release_year END, \
                    \"cast\" = CASE WHEN $5 THEN $6 ELSE \"cast\" END, \
                    director_id = COALESCE($7, director_id) \
                 WHERE id = $1",
            )
            .bind(id)
            .bind(input.title.value().map(String::as_str))
            .bind(input.release_year.is_present())
            .bind(input.release_year.value().copied())
            .bind(input.cast.is_present())
            .bind(input.cast.value().map(String::as_str))
            .bind(input.director_id.value().copied())
            .execute(&mut *conn)
            .await?;
        }

        if let Some(genre_ids) = input.genre_ids() {
            Self::replace_genres(conn, id, genre_ids).await?;
        }

        tracing::info!(movie_id = id, "Updated movie");

        Ok(Self::find_by_id(conn, id).await?)
    }

    /// Delete a movie. Its ratings and genre links go with it through
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make the movie's genre links equal to `genre_ids`.
    ///
    /// Links outside the target set are deleted, missing ones inserted;
    /// links already in place are left alone. An empty slice clears all links.
    pub async fn replace_genres(
        conn: &mut PgConnection,
        movie_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let target: BTreeSet<DbId> = genre_ids.iter().copied().collect();
        let current: BTreeSet<DbId> = sqlx::query_scalar::<_, DbId>(
            "SELECT genre_id FROM genres_movie WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect();

        let stale: Vec<DbId> = current.difference(&target).copied().collect();
        let missing: Vec<DbId> = target.difference(&current).copied().collect();

        if !stale.is_empty() {
            sqlx::query("DELETE FROM genres_movie WHERE movie_id = $1 AND genre_id = ANY($2)")
                .bind(movie_id)
                .bind(stale.as_slice())
                .execute(&mut *conn)
                .await?;
        }

        if !missing.is_empty() {
            sqlx::query(
                "INSERT INTO genres_movie (movie_id, genre_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(movie_id)
            .bind(missing.as_slice())
            .execute(&mut *conn)
            .await?;
        }

        tracing::debug!(
            movie_id,
            added = missing.len(),
            removed = stale.len(),
            "Replaced genre links"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn check_director(conn: &mut PgConnection, director_id: DbId) -> Result<(), RepoError> {
        if DirectorRepo::exists(conn, director_id).await? {
            Ok(())
        } else {
            tracing::warn!(director_id, "Rejected unknown director reference");
            Err(RepoError::InvalidDirector(director_id))
        }
    }

    /// Every distinct requested id must resolve. Duplicates of a valid id
    /// do not make up for a missing one.
    async fn check_genres(conn: &mut PgConnection, genre_ids: &[DbId]) -> Result<(), RepoError> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let requested: Vec<DbId> = genre_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let found = GenreRepo::find_by_ids(conn, &requested).await?;

        if found.len() == requested.len() {
            Ok(())
        } else {
            tracing::warn!(
                requested = requested.len(),
                found = found.len(),
                "Rejected unknown genre reference"
            );
            Err(RepoError::InvalidGenres)
        }
    }

    /// Batch-load genres for `rows` and assemble the items, keeping row order.
    async fn attach_genres(
        conn: &mut PgConnection,
        rows: Vec<MovieRow>,
    ) -> Result<Vec<MovieItem>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let movie_ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut by_movie: HashMap<DbId, Vec<Genre>> = HashMap::new();
        for link in GenreRepo::list_for_movies(conn, &movie_ids).await? {
            by_movie.entry(link.movie_id).or_default().push(Genre {
                id: link.id,
                name: link.name,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let genres = by_movie.remove(&row.id).unwrap_or_default();
                MovieItem::from_row(row, genres)
            })
            .collect())
    }
}
