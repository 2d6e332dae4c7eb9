//! # Order Service
//!
//! Owns [`Order`]s and their [`OrderItem`](crate::model::OrderItem)s and is the only
//! service that talks to the others.
//!
//! ## Order Creation Workflow
//!
//! [`OrderService::create_order`] runs these steps in the caller's task, one after another:
//!
//! 1. **User validation**: ask the [`UserDirectory`] for the user. Any failure, whether
//!    the user is missing or the peer is down, rejects the request as invalid input.
//! 2. **Menu resolution**: for each requested line, in input order, ask the
//!    [`MenuCatalog`] for the item. The first failure aborts the whole request.
//! 3. **Snapshot**: copy each item's name and price into the new line.
//! 4. **Persist**: hand the order and its items to the store as one create request.
//!
//! Nothing is written until step 4, so an aborted request (or a caller that gives up and
//! drops the future) leaves no trace.
//!
//! ```text
//! create_order ──► UserDirectory::get_user
//!              ──► MenuCatalog::get_menu_item  (× lines)
//!              ──► RecordStore<Order>::create   (order + items)
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_actor::Record) implementation for [`Order`]
//! - [`error`] - [`OrderError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{MenuCatalog, UserDirectory};
use crate::model::{NewOrderItem, Order, OrderCreate, OrderId, OrderLine, OrderUpdate, UserId};
use record_actor::{RecordStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Service over the `orders` and `order_items` tables.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn RecordStore<Order>>,
    users: Arc<dyn UserDirectory>,
    menu: Arc<dyn MenuCatalog>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn RecordStore<Order>>,
        users: Arc<dyn UserDirectory>,
        menu: Arc<dyn MenuCatalog>,
    ) -> Self {
        Self { store, users, menu }
    }

    /// Places an order for `user_id`.
    ///
    /// An empty `lines` produces an order with no items. Quantities are taken as given.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        lines: Vec<OrderLine>,
    ) -> Result<Order, OrderError> {
        debug!(?lines, "create_order called");

        self.users.get_user(user_id).await.map_err(|status| {
            warn!(%user_id, %status, "User validation failed");
            OrderError::InvalidUser(status.to_string())
        })?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let menu_item = self
                .menu
                .get_menu_item(line.menu_item_id)
                .await
                .map_err(|status| {
                    warn!(menu_item_id = %line.menu_item_id, %status, "Menu item lookup failed");
                    OrderError::InvalidMenuItem(line.menu_item_id, status.to_string())
                })?;

            items.push(NewOrderItem {
                menu_item_id: line.menu_item_id,
                menu_item_name: menu_item.name,
                quantity: line.quantity,
                price: menu_item.price,
            });
        }

        let order = self
            .store
            .create(OrderCreate { user_id, items })
            .await
            .map_err(|e| OrderError::DatabaseError(format!("failed to create order: {e}")))?;

        info!(order_id = %order.id, %user_id, items = order.items.len(), "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.store
            .get(id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.store
            .list()
            .await
            .map_err(|e| OrderError::DatabaseError(format!("failed to get orders: {e}")))
    }

    /// Overwrites the status unconditionally and returns the full order.
    #[instrument(skip(self, status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: impl Into<String>,
    ) -> Result<Order, OrderError> {
        let status = status.into();
        debug!(%status, "update_order_status called");
        let order = self
            .store
            .update(id, OrderUpdate { status })
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => OrderError::NotFound(id),
                other => {
                    OrderError::DatabaseError(format!("failed to update order status: {other}"))
                }
            })?;
        info!(order_id = %order.id, status = %order.status, "Order status updated");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => OrderError::NotFound(id),
            other => OrderError::DatabaseError(format!("failed to delete order: {other}")),
        })?;
        info!(order_id = %id, "Order deleted");
        Ok(())
    }
}
