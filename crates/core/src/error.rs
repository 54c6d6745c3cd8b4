use crate::types::DbId;

/// Domain error kinds surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input that passed request parsing but breaks a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A director or genre id that does not resolve to a stored row.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
