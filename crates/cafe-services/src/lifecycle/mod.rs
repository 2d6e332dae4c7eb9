//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the three services, either all inside one process or each
//! as its own network service.
//!
//! ## In-process: [`CafeSystem`]
//!
//! [`CafeSystem::new`] spawns one actor store per record type and wires the order service
//! straight to the user and menu services:
//!
//! ```rust,ignore
//! let system = CafeSystem::new();
//!
//! let alice = system.users.create_user(UserCreate::new("Alice", "alice@example.com")).await?;
//! let latte = system.menu.create_menu_item(MenuItemCreate::new("Latte", price)).await?;
//! let order = system
//!     .orders
//!     .create_order(alice.id, vec![OrderLine::new(latte.id, 2)])
//!     .await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## As services: [`launch`]
//!
//! [`run_user_service`], [`run_menu_service`] and [`run_order_service`] each open the
//! configured store (PostgreSQL with migrations, or an actor store), build the service,
//! and serve its RPC router until Ctrl-C. The order service reaches its peers through
//! [`RpcUserClient`](crate::clients::RpcUserClient) and
//! [`RpcMenuClient`](crate::clients::RpcMenuClient).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all service handles** - every store client goes with them
//! 2. **Stores detect closure** - `receiver.recv()` returns `None`
//! 3. **Stores log final state** - `Shutdown` with the row count
//! 4. **Await completion** - the store tasks are joined
//!
//! The dependency graph is acyclic (orders → users, menu), so channel closure alone is
//! enough to stop everything.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber. Call it once from `main`.

pub mod cafe_system;
pub mod launch;

pub use cafe_system::*;
pub use launch::*;
pub use record_actor::tracing::setup_tracing;
