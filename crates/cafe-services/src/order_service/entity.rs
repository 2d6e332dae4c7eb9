//! Record trait implementation for [`Order`].
//!
//! An order and its items are created by a single store request, so they appear
//! together or not at all. Item IDs come from the store's child sequence.

use crate::model::{
    Order, OrderCreate, OrderId, OrderItem, OrderItemId, OrderUpdate, DEFAULT_ORDER_STATUS,
};
use chrono::{DateTime, Utc};
use record_actor::{CreateContext, Record};
use std::convert::Infallible;

impl Record for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Error = Infallible;

    /// Builds the order with status `pending` and one item per resolved line, in order.
    fn from_create_params(
        id: OrderId,
        params: OrderCreate,
        ctx: &mut CreateContext<'_>,
    ) -> Result<Self, Infallible> {
        let now = ctx.now();
        let items = params
            .items
            .into_iter()
            .map(|item| OrderItem {
                id: OrderItemId(ctx.next_child_id()),
                order_id: id,
                menu_item_id: item.menu_item_id,
                menu_item_name: item.menu_item_name,
                quantity: item.quantity,
                price: item.price,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Ok(Self {
            id,
            user_id: params.user_id,
            status: DEFAULT_ORDER_STATUS.to_string(),
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Any status is accepted; there is no state machine.
    fn on_update(&mut self, update: OrderUpdate, now: DateTime<Utc>) -> Result<(), Infallible> {
        self.status = update.status;
        self.updated_at = now;
        Ok(())
    }
}
