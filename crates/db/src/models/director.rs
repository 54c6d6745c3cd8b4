//! Director entity model and DTOs.

use cinerate_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `directors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Director {
    pub id: DbId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub description: Option<String>,
}

/// The `{id, name}` projection embedded in movie items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorRef {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a director.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDirector {
    pub name: String,
    pub birth_year: Option<i32>,
    pub description: Option<String>,
}
