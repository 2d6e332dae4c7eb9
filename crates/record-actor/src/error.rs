//! # Store Errors
//!
//! Common error type returned by every [`RecordStore`](crate::RecordStore) implementation,
//! whether the rows live in an actor's memory or in a relational database.

/// Errors that can occur while talking to a record store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store closed")]
    Closed,
    #[error("store dropped response channel")]
    Dropped,
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("store backend error: {0}")]
    Backend(String),
}
