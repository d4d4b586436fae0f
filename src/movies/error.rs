//! Store error types

use thiserror::Error;

/// Errors raised by store mutations and id assignment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record was inserted without an identifier.
    #[error("movie id must not be empty")]
    EmptyId,

    /// A record with this identifier is already stored.
    #[error("movie id already exists: {id}")]
    DuplicateId { id: String },

    /// The generator could not find a free identifier.
    #[error("no free movie id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}
