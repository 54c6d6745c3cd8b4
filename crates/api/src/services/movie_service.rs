use cinerate_core::error::CoreError;
use cinerate_core::pagination::PageRequest;
use cinerate_core::types::DbId;
use cinerate_db::models::movie::{CreateMovie, MovieFilter, MovieItem, UpdateMovie};
use cinerate_db::repositories::MovieRepo;
use cinerate_db::DbPool;
use serde::Serialize;

use super::MOVIE_ENTITY;
use crate::error::{AppError, AppResult};

/// Payload of `GET /movies`.
#[derive(Debug, Serialize)]
pub struct MovieListPage {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub items: Vec<MovieItem>,
}

/// Movie operations, each run in its own transaction.
pub struct MovieService;

impl MovieService {
    pub async fn list(
        pool: &DbPool,
        filter: &MovieFilter,
        page: PageRequest,
    ) -> AppResult<MovieListPage> {
        let mut tx = pool.begin().await?;
        let result = MovieRepo::list(&mut *tx, filter, page).await?;
        tx.commit().await?;

        Ok(MovieListPage {
            page: page.page,
            page_size: page.page_size,
            total_items: result.total,
            items: result.items,
        })
    }

    pub async fn get(pool: &DbPool, id: DbId) -> AppResult<MovieItem> {
        let mut tx = pool.begin().await?;
        let movie = MovieRepo::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(movie)
    }

    /// Create a movie after its director and genres have been resolved.
    pub async fn create(pool: &DbPool, input: &CreateMovie) -> AppResult<MovieItem> {
        let mut tx = pool.begin().await?;
        let movie = MovieRepo::create(&mut *tx, input).await?;
        tx.commit().await?;
        Ok(movie)
    }

    /// Apply a partial update. A concurrent delete of the same movie
    /// surfaces as not-found rather than a storage error.
    pub async fn update(pool: &DbPool, id: DbId, input: &UpdateMovie) -> AppResult<MovieItem> {
        let mut tx = pool.begin().await?;
        let movie = MovieRepo::update(&mut *tx, id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(movie)
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
        let mut tx = pool.begin().await?;
        if !MovieRepo::delete(&mut *tx, id).await? {
            return Err(not_found(id));
        }
        tx.commit().await?;
        tracing::info!(movie_id = id, "Deleted movie");
        Ok(())
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: MOVIE_ENTITY,
        id,
    })
}
