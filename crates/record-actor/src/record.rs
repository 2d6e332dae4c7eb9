//! # Record Trait
//!
//! The `Record` trait is the contract every persisted row type (User, MenuItem, Order, …)
//! implements to be hosted by the generic [`ResourceActor`](crate::ResourceActor).
//! It names the identifier and the create/update payloads, and provides the two
//! hooks the store calls when a row is born or overwritten.
//!
//! # Architecture Note
//! The store never inspects payloads itself. By routing creation and updates through
//! `from_create_params` and `on_update`, required-field checks live next to the type
//! that owns the fields, and the actor stays a plain table.
//!
//! Associated types keep the payloads honest: a `User` store only accepts a
//! `UserCreate`, so a `MenuItemCreate` can never reach it.

use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Values the store hands to a record while it is being created.
///
/// Carries the creation timestamp and a second id sequence for rows the record
/// owns by composition (an order's line items, for example).
#[derive(Debug)]
pub struct CreateContext<'a> {
    now: DateTime<Utc>,
    child_ids: &'a mut u32,
}

impl<'a> CreateContext<'a> {
    pub fn new(now: DateTime<Utc>, child_ids: &'a mut u32) -> Self {
        Self { now, child_ids }
    }

    /// The timestamp to use for `created_at` and `updated_at`.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Allocates the next identifier for an owned child row.
    pub fn next_child_id(&mut self) -> u32 {
        let id = *self.child_ids;
        *self.child_ids += 1;
        id
    }
}

/// Trait that any persisted row type must implement to be managed by a store.
///
/// # Error Granularity
///
/// Each record has a single error type for both hooks. The store does not look inside
/// it: a failing hook is reported as [`StoreError::Validation`](crate::StoreError::Validation)
/// carrying the error's display text.
pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    /// Must be convertible from u32 for automatic ID generation, and ordered so
    /// listings come back in insertion order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The fields required to create a new row.
    type Create: Send + Sync + Debug + 'static;

    /// The fields overwritten by an update.
    type Update: Send + Sync + Debug + 'static;

    /// Validation failure raised by the hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the generated ID and the payload.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &mut CreateContext<'_>,
    ) -> Result<Self, Self::Error>;

    /// Apply an update in place. `now` is the new `updated_at`.
    fn on_update(&mut self, update: Self::Update, now: DateTime<Utc>) -> Result<(), Self::Error>;

    /// A value that must be unique across all live rows (e.g. an email address).
    fn unique_key(&self) -> Option<String> {
        None
    }
}
