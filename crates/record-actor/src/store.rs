//! # RecordStore Trait
//!
//! The seam between a service and its persistence. Services hold an
//! `Arc<dyn RecordStore<T>>` handed to them at construction time and never know
//! whether the rows live in a [`ResourceActor`](crate::ResourceActor) or in Postgres.

use crate::error::StoreError;
use crate::record::Record;
use async_trait::async_trait;

/// Create, read, update and delete rows of a single record type.
///
/// Implementations must be safe to share between concurrently running requests.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Insert a new row. Returns the row with its generated ID and timestamps.
    async fn create(&self, params: T::Create) -> Result<T, StoreError>;

    /// Fetch a row by ID, or `None` when no live row matches.
    async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// Every live row. An empty table yields an empty vec.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Overwrite a row. Fails with [`StoreError::NotFound`] when the ID is absent.
    async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError>;

    /// Remove a row. Fails with [`StoreError::NotFound`] when zero rows matched.
    async fn delete(&self, id: T::Id) -> Result<(), StoreError>;
}
