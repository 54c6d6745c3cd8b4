//! Handlers for ratings nested under a movie:
//! `/movies/{movie_id}/ratings`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinerate_core::types::DbId;
use cinerate_db::models::rating::{CreateRating, RatingItem};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::DataResponse;
use crate::services::RatingService;
use crate::state::AppState;

/// POST /api/v1/movies/{movie_id}/ratings
pub async fn create(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CreateRating>,
) -> AppResult<(StatusCode, Json<DataResponse<RatingItem>>)> {
    let rating = RatingService::create(&state.pool, movie_id, input.score).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(rating))))
}

/// GET /api/v1/movies/{movie_id}/ratings
///
/// Newest first.
pub async fn list_by_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<RatingItem>>>> {
    let ratings = RatingService::list(&state.pool, movie_id).await?;
    Ok(Json(DataResponse::new(ratings)))
}
