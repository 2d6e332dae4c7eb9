//! # Record Actor
//!
//! Building blocks for record stores: a generic in-memory table that runs as a Tokio actor,
//! the cloneable client that talks to it, and the [`RecordStore`] trait that services
//! program against so the same code runs over memory or a relational database.
//!
//! ## 🧱 Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Record Layer** ([`Record`]) - Your row type, its payloads and validation hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and ID/timestamp generation
//! 3. **Interface Layer** ([`ResourceClient`] / [`RecordStore`]) - Type-safe access
//!
//! You write required-field checks **once** in the record hooks; the actor handles the
//! message passing, ID sequences, unique keys and error reporting.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use record_actor::{CreateContext, Record, RecordStore, ResourceActor};
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Clone, Debug)]
//! struct User {
//!     id: u32,
//!     email: String,
//!     updated_at: DateTime<Utc>,
//! }
//!
//! #[derive(Debug)] struct UserCreate { email: String }
//! #[derive(Debug)] struct UserUpdate { email: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("email is required")]
//! struct UserError;
//!
//! impl Record for User {
//!     type Id = u32;
//!     type Create = UserCreate;
//!     type Update = UserUpdate;
//!     type Error = UserError;
//!
//!     fn from_create_params(id: u32, params: UserCreate, ctx: &mut CreateContext<'_>) -> Result<Self, UserError> {
//!         if params.email.is_empty() { return Err(UserError); }
//!         Ok(Self { id, email: params.email, updated_at: ctx.now() })
//!     }
//!
//!     fn on_update(&mut self, update: UserUpdate, now: DateTime<Utc>) -> Result<(), UserError> {
//!         self.email = update.email;
//!         self.updated_at = now;
//!         Ok(())
//!     }
//!
//!     fn unique_key(&self) -> Option<String> {
//!         Some(self.email.clone())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<User>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let user = client.create(UserCreate { email: "alice@example.com".into() }).await.unwrap();
//!     let fetched = client.get(user.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.email, "alice@example.com");
//!
//!     // Emails are unique
//!     let dup = client.create(UserCreate { email: "alice@example.com".into() }).await;
//!     assert!(dup.is_err());
//! }
//! ```
//!
//! ## ⚙️ Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Messages are processed **sequentially** within a store (no locks needed)
//! - Callers await concurrently; only access to the rows is serialised
//! - Dropping the last client closes the mailbox and the actor shuts down
//!
//! ## 🧪 Testing
//!
//! [`mock::MockClient`] hands out a real [`ResourceClient`] answered from scripted
//! expectations, so failure paths (a dead database, a vanished row) are one line to set up.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use error::StoreError;
pub use message::{ResourceRequest, Response};
pub use record::{CreateContext, Record};
pub use store::RecordStore;
