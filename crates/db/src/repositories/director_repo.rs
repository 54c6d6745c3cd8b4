//! Repository for the `directors` table.

use cinerate_core::types::DbId;
use sqlx::PgConnection;

use crate::models::director::{CreateDirector, Director};

const COLUMNS: &str = "id, name, birth_year, description";

/// Provides create/read operations for directors.
pub struct DirectorRepo;

impl DirectorRepo {
    /// Insert a new director, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateDirector,
    ) -> Result<Director, sqlx::Error> {
        let query = format!(
            "INSERT INTO directors (name, birth_year, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Director>(&query)
            .bind(&input.name)
            .bind(input.birth_year)
            .bind(&input.description)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Director>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM directors WHERE id = $1");
        sqlx::query_as::<_, Director>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// First director with exactly this name, by id.
    pub async fn find_by_name(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Option<Director>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM directors WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Director>(&query)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM directors WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete a director. Fails with a foreign-key violation while any
    /// movie still references it. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM directors WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
