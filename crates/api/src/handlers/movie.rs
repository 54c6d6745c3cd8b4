//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinerate_core::types::DbId;
use cinerate_db::models::movie::{CreateMovie, MovieItem, UpdateMovie};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::query::ListMoviesParams;
use crate::response::DataResponse;
use crate::services::{MovieListPage, MovieService};
use crate::state::AppState;

/// GET /api/v1/movies
///
/// Supports `?page=&page_size=&title=&release_year=&genre=`.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListMoviesParams>,
) -> AppResult<Json<DataResponse<MovieListPage>>> {
    let page = params.page_request()?;
    let filter = params.filter()?;
    tracing::debug!(?filter, page = page.page, page_size = page.page_size, "Listing movies");

    let result = MovieService::list(&state.pool, &filter, page).await?;
    Ok(Json(DataResponse::new(result)))
}

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<MovieItem>>)> {
    let movie = MovieService::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(movie))))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<MovieItem>>> {
    let movie = MovieService::get(&state.pool, id).await?;
    Ok(Json(DataResponse::new(movie)))
}

/// PUT /api/v1/movies/{id}
///
/// Partial update: omitted fields are left untouched.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateMovie>,
) -> AppResult<Json<DataResponse<MovieItem>>> {
    let movie = MovieService::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse::new(movie)))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    MovieService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
