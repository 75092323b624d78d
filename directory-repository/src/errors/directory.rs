//! Error types for the directory repository.
//! Defines the errors that can occur while reading directory records from a store.
use thiserror::Error;

/// Represents errors that can occur within the directory repository.
///
/// `DanglingReference` is raised when a stored record points at a row that does not
/// exist. It signals that the stored data violates its own invariants and must not be
/// treated as an ordinary "not found".
#[derive(Debug, Error)]
pub enum DirectoryRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: i32,
        target: &'static str,
        target_id: i32,
    },
}

impl DirectoryRepositoryError {
    /// Create a dangling reference error.
    pub fn dangling(entity: &'static str, id: i32, target: &'static str, target_id: i32) -> Self {
        Self::DanglingReference {
            entity,
            id,
            target,
            target_id,
        }
    }

    /// Returns true if the error reports stored data that violates its own invariants.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::DanglingReference { .. })
    }
}
