//! Domain vocabulary shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O; it holds identifiers, error kinds,
//! the partial-update wrapper and the small rules (bounds, parsing,
//! rendering) that both sides must agree on.

pub mod error;
pub mod movie;
pub mod pagination;
pub mod patch;
pub mod rating;
pub mod types;
