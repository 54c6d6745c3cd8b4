//! Integration tests for the movie repository.
//!
//! Exercises list filtering and pagination, the rating aggregate,
//! reference checks on create/update, genre replacement and the delete
//! cascade against a real database.

use assert_matches::assert_matches;
use cinerate_core::pagination::PageRequest;
use cinerate_core::patch::Patch;
use cinerate_core::types::DbId;
use cinerate_db::models::director::CreateDirector;
use cinerate_db::models::genre::CreateGenre;
use cinerate_db::models::movie::{CreateMovie, MovieFilter, UpdateMovie};
use cinerate_db::repositories::{DirectorRepo, GenreRepo, MovieRepo, RatingRepo};
use cinerate_db::RepoError;
use sqlx::{PgConnection, PgPool};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn director(conn: &mut PgConnection, name: &str) -> DbId {
    DirectorRepo::create(
        conn,
        &CreateDirector {
            name: name.to_string(),
            birth_year: None,
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn genre(conn: &mut PgConnection, name: &str) -> DbId {
    GenreRepo::create(conn, &CreateGenre { name: name.to_string() })
        .await
        .unwrap()
        .id
}

fn new_movie(title: &str, director_id: DbId, genre_ids: Vec<DbId>) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        release_year: None,
        cast: None,
        director_id,
        genre_ids,
    }
}

async fn movie_count(conn: &mut PgConnection) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(conn)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_materialized_item(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let nolan = director(&mut conn, "Christopher Nolan").await;
    let scifi = genre(&mut conn, "Sci-Fi").await;
    let thriller = genre(&mut conn, "Thriller").await;

    let mut input = new_movie("Inception", nolan, vec![thriller, scifi]);
    input.release_year = Some(2010);
    input.cast = Some("Leonardo DiCaprio".to_string());

    let item = MovieRepo::create(&mut conn, &input).await.unwrap();
    assert_eq!(item.title, "Inception");
    assert_eq!(item.release_year, Some(2010));
    assert_eq!(item.cast.as_deref(), Some("Leonardo DiCaprio"));
    assert_eq!(item.director.id, nolan);
    assert_eq!(item.director.name, "Christopher Nolan");
    let genre_ids: Vec<DbId> = item.genres.iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec![scifi, thriller]);
    assert_eq!(item.ratings_count, 0);
    assert_eq!(item.average_rating, None);

    let found = MovieRepo::find_by_id(&mut conn, item.id)
        .await
        .unwrap()
        .expect("movie should exist");
    assert_eq!(found, item);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_movie_returns_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    assert!(MovieRepo::find_by_id(&mut conn, 424242).await.unwrap().is_none());
    assert!(!MovieRepo::exists(&mut conn, 424242).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_director_persists_nothing(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();

    let result = MovieRepo::create(&mut conn, &new_movie("Ghost", 999, vec![])).await;
    assert_matches!(result, Err(RepoError::InvalidDirector(999)));
    assert_eq!(movie_count(&mut conn).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_genre_ids_do_not_mask_missing_one(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let drama = genre(&mut conn, "Drama").await;
    let missing = drama + 1000;

    let result =
        MovieRepo::create(&mut conn, &new_movie("Dup", d, vec![drama, drama, missing])).await;
    assert_matches!(result, Err(RepoError::InvalidGenres));
    assert_eq!(movie_count(&mut conn).await, 0);

    // Duplicates of valid ids alone are fine and produce a single link.
    let item = MovieRepo::create(&mut conn, &new_movie("Dup", d, vec![drama, drama]))
        .await
        .unwrap();
    assert_eq!(item.genres.len(), 1);
    assert_eq!(item.genres[0].id, drama);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_average_rating_is_rounded_to_two_decimals(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let movie = MovieRepo::create(&mut conn, &new_movie("Rated", d, vec![]))
        .await
        .unwrap();

    for score in [7, 8, 8] {
        RatingRepo::create(&mut conn, movie.id, score).await.unwrap();
    }

    let item = MovieRepo::find_by_id(&mut conn, movie.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.ratings_count, 3);
    assert_eq!(item.average_rating, Some(7.67));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_are_conjunctive(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let scifi = genre(&mut conn, "Sci-Fi").await;
    let drama = genre(&mut conn, "Drama").await;

    let mut dark = new_movie("The Dark Knight", d, vec![drama]);
    dark.release_year = Some(2008);
    let mut darker = new_movie("Dark City", d, vec![scifi, drama]);
    darker.release_year = Some(1998);
    let mut bright = new_movie("Bright", d, vec![scifi]);
    bright.release_year = Some(2008);
    for input in [&dark, &darker, &bright] {
        MovieRepo::create(&mut conn, input).await.unwrap();
    }

    let title_only = MovieFilter {
        title: Some("DARK".to_string()),
        ..Default::default()
    };
    let page = MovieRepo::list(&mut conn, &title_only, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let title_and_year = MovieFilter {
        title: Some("dark".to_string()),
        release_year: Some(2008),
        genre: None,
    };
    let page = MovieRepo::list(&mut conn, &title_and_year, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "The Dark Knight");

    let genre_only = MovieFilter {
        genre: Some("sci".to_string()),
        ..Default::default()
    };
    let page = MovieRepo::list(&mut conn, &genre_only, PageRequest::default())
        .await
        .unwrap();
    let titles: Vec<&str> = page.items.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Dark City", "Bright"]);
    // A movie matching the genre filter still reports all of its genres.
    assert_eq!(page.items[0].genres.len(), 2);

    let nothing = MovieFilter {
        title: Some("bright".to_string()),
        genre: Some("drama".to_string()),
        ..Default::default()
    };
    let page = MovieRepo::list(&mut conn, &nothing, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_title_filter_matches_wildcards_literally(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    MovieRepo::create(&mut conn, &new_movie("100% Wolf", d, vec![]))
        .await
        .unwrap();
    MovieRepo::create(&mut conn, &new_movie("1000 Wolves", d, vec![]))
        .await
        .unwrap();

    let filter = MovieFilter {
        title: Some("100%".to_string()),
        ..Default::default()
    };
    let page = MovieRepo::list(&mut conn, &filter, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "100% Wolf");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_by_id_with_unpaginated_total(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let mut ids = Vec::new();
    for i in 0..5 {
        let item = MovieRepo::create(&mut conn, &new_movie(&format!("Movie {i}"), d, vec![]))
            .await
            .unwrap();
        ids.push(item.id);
    }

    let second = PageRequest::new(Some(2), Some(2)).unwrap();
    let page = MovieRepo::list(&mut conn, &MovieFilter::default(), second)
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    let page_ids: Vec<DbId> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(page_ids, ids[2..4].to_vec());

    let past_end = PageRequest::new(Some(4), Some(2)).unwrap();
    let page = MovieRepo::list(&mut conn, &MovieFilter::default(), past_end)
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert!(page.items.is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_only_touches_present_fields(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let drama = genre(&mut conn, "Drama").await;
    let mut input = new_movie("Se7en", d, vec![drama]);
    input.release_year = Some(1995);
    input.cast = Some("Brad Pitt".to_string());
    let movie = MovieRepo::create(&mut conn, &input).await.unwrap();

    let update = UpdateMovie {
        title: Patch::Value("Seven".to_string()),
        cast: Patch::Null,
        ..Default::default()
    };
    let updated = MovieRepo::update(&mut conn, movie.id, &update)
        .await
        .unwrap()
        .expect("movie should exist");

    assert_eq!(updated.title, "Seven");
    assert_eq!(updated.cast, None);
    assert_eq!(updated.release_year, Some(1995));
    assert_eq!(updated.director.id, d);
    assert_eq!(updated.genres.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_empty_genre_list_clears_links(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let drama = genre(&mut conn, "Drama").await;
    let thriller = genre(&mut conn, "Thriller").await;
    let movie = MovieRepo::create(&mut conn, &new_movie("Zodiac", d, vec![drama, thriller]))
        .await
        .unwrap();

    let swap = UpdateMovie {
        genre_ids: Patch::Value(vec![thriller]),
        ..Default::default()
    };
    let updated = MovieRepo::update(&mut conn, movie.id, &swap)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.genres.len(), 1);
    assert_eq!(updated.genres[0].id, thriller);

    let untouched = MovieRepo::update(&mut conn, movie.id, &UpdateMovie::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.genres.len(), 1);

    let clear = UpdateMovie {
        genre_ids: Patch::Value(vec![]),
        ..Default::default()
    };
    let cleared = MovieRepo::update(&mut conn, movie.id, &clear)
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.genres.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_unknown_references_without_writing(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let movie = MovieRepo::create(&mut conn, &new_movie("Alien", d, vec![]))
        .await
        .unwrap();

    let bad_director = UpdateMovie {
        title: Patch::Value("Aliens".to_string()),
        director_id: Patch::Value(d + 1000),
        ..Default::default()
    };
    let result = MovieRepo::update(&mut conn, movie.id, &bad_director).await;
    assert_matches!(result, Err(RepoError::InvalidDirector(_)));

    let bad_genres = UpdateMovie {
        title: Patch::Value("Aliens".to_string()),
        genre_ids: Patch::Value(vec![31337]),
        ..Default::default()
    };
    let result = MovieRepo::update(&mut conn, movie.id, &bad_genres).await;
    assert_matches!(result, Err(RepoError::InvalidGenres));

    let unchanged = MovieRepo::find_by_id(&mut conn, movie.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.title, "Alien");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_movie_returns_none(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = MovieRepo::update(&mut conn, 777, &UpdateMovie::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_ratings_and_links(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let d = director(&mut conn, "D").await;
    let drama = genre(&mut conn, "Drama").await;
    let movie = MovieRepo::create(&mut conn, &new_movie("Heat", d, vec![drama]))
        .await
        .unwrap();
    RatingRepo::create(&mut conn, movie.id, 9).await.unwrap();

    assert!(MovieRepo::delete(&mut conn, movie.id).await.unwrap());
    assert!(!MovieRepo::delete(&mut conn, movie.id).await.unwrap());

    let orphan_ratings: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM movie_ratings WHERE movie_id = $1")
            .bind(movie.id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(orphan_ratings, 0);

    let orphan_links: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM genres_movie WHERE movie_id = $1")
            .bind(movie.id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(orphan_links, 0);

    // The director and genre survive.
    assert!(DirectorRepo::exists(&mut conn, d).await.unwrap());
    assert!(GenreRepo::find_by_id(&mut conn, drama).await.unwrap().is_some());
}
