//! # Cafe Services
//!
//! Three record-management services for a cafe (users, menu items, orders) exposed over a
//! JSON RPC interface and backed by PostgreSQL or in-process actor stores.
//!
//! ## 🚀 Core Components
//!
//! - **[model]**: Plain data structures ([`User`](model::User), [`MenuItem`](model::MenuItem),
//!   [`Order`](model::Order)) and their create/update payloads.
//! - **[user_service] / [menu_service]**: CRUD over a single record type.
//! - **[order_service]**: validates the user and every menu item with its peers, snapshots
//!   names and prices, then persists the order and its items in one write.
//! - **[clients]**: the [`UserDirectory`](clients::UserDirectory) and
//!   [`MenuCatalog`](clients::MenuCatalog) seams, with in-process and RPC implementations.
//! - **[rpc]**: axum routers, request/response messages and the [`Status`](rpc::Status) codes.
//! - **[postgres]**: `sqlx` stores and migrations.
//! - **[config]** / **[lifecycle]**: environment configuration, in-process wiring
//!   ([`CafeSystem`](lifecycle::CafeSystem)) and the per-service launchers.
//!
//! ## 🧪 Testing
//!
//! Services take their store and peers as trait objects, so tests swap in
//! [`record_actor::mock::MockClient`] or a hand-written [`UserDirectory`](clients::UserDirectory).

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_service;
pub mod model;
pub mod order_service;
pub mod postgres;
pub mod rpc;
pub mod user_service;
