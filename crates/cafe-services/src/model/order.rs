//! Orders and their line items.
//!
//! An [`Order`] owns its [`OrderItem`]s by composition. Each item carries a snapshot of
//! the menu item's name and price taken when the order was placed; nothing here points
//! back at the live [`MenuItem`](crate::model::MenuItem).
use crate::model::{MenuItemId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status given to every new order.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe identifier for Order Items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(pub u32);

impl From<u32> for OrderItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer order.
///
/// `user_id` is a reference that was checked when the order was created; it is not
/// re-validated afterwards. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order, frozen at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub menu_item_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a caller asks for: a menu item and how many.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }
}

/// A resolved line, ready to persist: the requested quantity plus the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_item_id: MenuItemId,
    pub menu_item_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Payload for persisting a new order together with its items.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub items: Vec<NewOrderItem>,
}

/// Payload for updating an order. Only the status is mutable.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub status: String,
}
