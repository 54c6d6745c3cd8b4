//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&mut PgConnection` as the first argument. The caller owns the
//! unit of work: pass `&mut *tx` from `pool.begin()` and commit when done,
//! or pass a pooled connection for standalone reads.

pub mod director_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod rating_repo;

pub use director_repo::DirectorRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use rating_repo::RatingRepo;
