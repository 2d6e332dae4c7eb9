//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by every binary in the
//! workspace.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`); store logs carry an `entity_type` field instead. Verbosity comes
//! from `RUST_LOG` and falls back to `info` when the variable is unset or unparsable.
//!
//! ```bash
//! # State changes only (default)
//! RUST_LOG=info order-service
//!
//! # Full payloads at every store and service entry point
//! RUST_LOG=debug order-service
//!
//! # Quiet the HTTP stack, keep the services chatty
//! RUST_LOG=info,cafe_services=debug,hyper=warn order-service
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Store started` and `Shutdown` with the final row count
//! - **Row operations**: `Created`, `Updated`, `Deleted`, and a `warn!` for every failure
//! - **Request flow**: service methods are `#[instrument]`ed, so peer lookups made while
//!   creating an order show up nested under `create_order`
//!
//! **With `RUST_LOG=debug`** an order creation reads:
//!
//! ```text
//! DEBUG create_order: create_order called user_id=1 lines=1
//! DEBUG create_order:get_user: Get entity_type="User" id=1 found=true user_id=1 lines=1
//! DEBUG create_order:get_menu_item: Get entity_type="MenuItem" id=1 found=true user_id=1 lines=1
//!  INFO create_order: Created entity_type="Order" size=1 user_id=1 lines=1
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
