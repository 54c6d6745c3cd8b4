//! Populate a database with a small demo catalogue.
//!
//! Safe to run repeatedly: rows that already exist (matched by name or
//! title) are reused and ratings are only added to movies created by
//! this run. Everything happens in one transaction.

use anyhow::Context;
use cinerate_core::types::DbId;
use cinerate_db::models::director::CreateDirector;
use cinerate_db::models::genre::CreateGenre;
use cinerate_db::models::movie::CreateMovie;
use cinerate_db::repositories::{DirectorRepo, GenreRepo, MovieRepo, RatingRepo};
use sqlx::PgConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct SeedMovie {
    title: &'static str,
    release_year: i32,
    cast: &'static str,
    director: &'static str,
    genres: &'static [&'static str],
    scores: &'static [i32],
}

const DIRECTORS: &[(&str, i32)] = &[("Christopher Nolan", 1970), ("David Fincher", 1962)];

const GENRES: &[&str] = &["Drama", "Sci-Fi", "Thriller"];

const MOVIES: &[SeedMovie] = &[
    SeedMovie {
        title: "Inception",
        release_year: 2010,
        cast: "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
        director: "Christopher Nolan",
        genres: &["Sci-Fi", "Thriller"],
        scores: &[9, 8],
    },
    SeedMovie {
        title: "Fight Club",
        release_year: 1999,
        cast: "Brad Pitt, Edward Norton, Helena Bonham Carter",
        director: "David Fincher",
        genres: &["Drama", "Thriller"],
        scores: &[10],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerate_seed=info,cinerate_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = cinerate_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    cinerate_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let mut tx = pool.begin().await?;
    let created = seed(&mut *tx).await?;
    tx.commit().await.context("Failed to commit seed data")?;

    tracing::info!(created_movies = created, "Seed complete");
    Ok(())
}

/// Insert the catalogue, returning how many movies were new.
async fn seed(conn: &mut PgConnection) -> anyhow::Result<usize> {
    for (name, birth_year) in DIRECTORS {
        director_id(conn, name, Some(*birth_year)).await?;
    }
    for name in GENRES {
        genre_id(conn, name).await?;
    }

    let mut created = 0;
    for movie in MOVIES {
        if MovieRepo::find_id_by_title(conn, movie.title).await?.is_some() {
            tracing::info!(title = movie.title, "Movie already present, skipping");
            continue;
        }

        let director_id = director_id(conn, movie.director, None).await?;
        let mut genre_ids = Vec::with_capacity(movie.genres.len());
        for name in movie.genres {
            genre_ids.push(genre_id(conn, name).await?);
        }

        let item = MovieRepo::create(
            conn,
            &CreateMovie {
                title: movie.title.to_string(),
                release_year: Some(movie.release_year),
                cast: Some(movie.cast.to_string()),
                director_id,
                genre_ids,
            },
        )
        .await
        .with_context(|| format!("Failed to create movie {}", movie.title))?;

        for score in movie.scores {
            RatingRepo::create(conn, item.id, *score).await?;
        }
        created += 1;
    }

    Ok(created)
}

async fn director_id(
    conn: &mut PgConnection,
    name: &str,
    birth_year: Option<i32>,
) -> anyhow::Result<DbId> {
    if let Some(existing) = DirectorRepo::find_by_name(conn, name).await? {
        return Ok(existing.id);
    }
    let director = DirectorRepo::create(
        conn,
        &CreateDirector {
            name: name.to_string(),
            birth_year,
            description: None,
        },
    )
    .await
    .with_context(|| format!("Failed to create director {name}"))?;
    Ok(director.id)
}

async fn genre_id(conn: &mut PgConnection, name: &str) -> anyhow::Result<DbId> {
    if let Some(existing) = GenreRepo::find_by_name(conn, name).await? {
        return Ok(existing.id);
    }
    let genre = GenreRepo::create(conn, &CreateGenre { name: name.to_string() })
        .await
        .with_context(|| format!("Failed to create genre {name}"))?;
    Ok(genre.id)
}
