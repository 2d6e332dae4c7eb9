//! # Peer Clients
//!
//! The order service needs two things from its peers: "does this user exist?" and "what is
//! this menu item called and what does it cost?". Those questions are the [`UserDirectory`]
//! and [`MenuCatalog`] traits.
//!
//! Two families of implementations exist:
//!
//! - **In-process** ([`local`]): the [`UserService`](crate::user_service::UserService) and
//!   [`MenuService`](crate::menu_service::MenuService) answer directly. Used by
//!   [`CafeSystem`](crate::lifecycle::CafeSystem) and most tests.
//! - **Remote** ([`remote`]): [`RpcUserClient`] and [`RpcMenuClient`] call the peer's RPC
//!   surface over HTTP. Used by the `order-service` binary.
//!
//! Either way a failure comes back as a [`Status`], so the order workflow treats a missing
//! user and an unreachable user service the same way.

pub mod local;
pub mod remote;

pub use remote::{RpcChannel, RpcMenuClient, RpcOrderClient, RpcUserClient, UnsupportedAddress};

use crate::model::{MenuItem, MenuItemId, User, UserId};
use crate::rpc::Status;
use async_trait::async_trait;

/// Looks users up by ID.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<User, Status>;
}

/// Looks menu items up by ID.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, Status>;
}
