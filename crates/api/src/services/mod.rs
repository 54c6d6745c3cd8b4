//! Domain service layer.
//!
//! Each operation is one unit of work: it begins a transaction on the
//! pool, passes `&mut *tx` to every repository call and commits only on
//! success. An early return drops the transaction, which rolls it back.

pub mod movie_service;
pub mod rating_service;

pub use movie_service::{MovieListPage, MovieService};
pub use rating_service::RatingService;

/// Entity name used in not-found errors for movies.
pub(crate) const MOVIE_ENTITY: &str = "Movie";
