//! Route definitions for movies and their ratings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{movie, rating};
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{movie_id}/ratings            -> list_by_movie
/// POST   /{movie_id}/ratings            -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie::list).post(movie::create))
        .route(
            "/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
        .route(
            "/{movie_id}/ratings",
            get(rating::list_by_movie).post(rating::create),
        )
}
