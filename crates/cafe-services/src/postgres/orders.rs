//! `orders` and `order_items` tables.
//!
//! An order is always read together with its live items. Creation writes the order row and
//! every item row in one transaction.

use super::{db_id, row_id, store_error};
use crate::model::{
    MenuItemId, Order, OrderCreate, OrderId, OrderItem, OrderItemId, OrderUpdate, UserId,
    DEFAULT_ORDER_STATUS,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_actor::{RecordStore, StoreError};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::{debug, instrument};

const ORDER_COLUMNS: &str = "id, user_id, status, created_at, updated_at";
const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, menu_item_id, menu_item_name, quantity, price, created_at, updated_at";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, StoreError> {
        Ok(Order {
            id: OrderId(row_id(self.id)?),
            user_id: UserId(row_id(self.user_id)?),
            status: self.status,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    menu_item_id: i32,
    menu_item_name: String,
    quantity: i64,
    price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = StoreError;

    fn try_from(row: OrderItemRow) -> Result<Self, StoreError> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            StoreError::Backend(format!("invalid quantity in database: {}", row.quantity))
        })?;
        Ok(Self {
            id: OrderItemId(row_id(row.id)?),
            order_id: OrderId(row_id(row.order_id)?),
            menu_item_id: MenuItemId(row_id(row.menu_item_id)?),
            menu_item_name: row.menu_item_name,
            quantity,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn out_of_range(what: &str, id: u32) -> StoreError {
    StoreError::Validation(format!("{what} {id} is out of range"))
}

/// Orders backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(
        conn: &mut PgConnection,
        order_id: i32,
    ) -> Result<Vec<OrderItem>, StoreError> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items \
             WHERE order_id = $1 AND deleted_at IS NULL ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(conn)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }
}

#[async_trait]
impl RecordStore<Order> for PgOrderStore {
    #[instrument(skip(self, params), fields(items = params.items.len()))]
    async fn create(&self, params: OrderCreate) -> Result<Order, StoreError> {
        let user_id =
            db_id(params.user_id.0).ok_or_else(|| out_of_range("user", params.user_id.0))?;

        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let order: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO orders (user_id, status) VALUES ($1, $2) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(DEFAULT_ORDER_STATUS)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_error)?;

        let mut items = Vec::with_capacity(params.items.len());
        for item in params.items {
            let menu_item_id = db_id(item.menu_item_id.0)
                .ok_or_else(|| out_of_range("menu item", item.menu_item_id.0))?;
            let row: OrderItemRow = sqlx::query_as(&format!(
                "INSERT INTO order_items (order_id, menu_item_id, menu_item_name, quantity, price) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {ORDER_ITEM_COLUMNS}"
            ))
            .bind(order.id)
            .bind(menu_item_id)
            .bind(&item.menu_item_name)
            .bind(i64::from(item.quantity))
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(store_error)?;
            items.push(OrderItem::try_from(row)?);
        }

        // Dropping `tx` without commit rolls everything back.
        tx.commit().await.map_err(store_error)?;
        debug!(order_id = order.id, "Order committed");
        order.into_order(items)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let Some(id) = db_id(id.0) else {
            return Ok(None);
        };
        let mut conn = self.pool.acquire().await.map_err(store_error)?;

        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(store_error)?;

        match row {
            Some(row) => {
                let items = Self::load_items(&mut conn, row.id).await?;
                row.into_order(items).map(Some)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items \
             WHERE order_id = ANY($1) AND deleted_at IS NULL ORDER BY id"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            let order_id = row.order_id;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(OrderItem::try_from(row)?);
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;
        let mut conn = self.pool.acquire().await.map_err(store_error)?;

        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "UPDATE orders SET status = $2, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {ORDER_COLUMNS}"
        ))
        .bind(key)
        .bind(&update.status)
        .fetch_optional(&mut *conn)
        .await
        .map_err(store_error)?;

        let row = row.ok_or_else(not_found)?;
        let items = Self::load_items(&mut conn, row.id).await?;
        row.into_order(items)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let result = sqlx::query(
            "UPDATE orders SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        sqlx::query(
            "UPDATE order_items SET deleted_at = now() WHERE order_id = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewOrderItem;
    use crate::postgres::testing;

    fn line(menu_item_id: u32, name: &str, quantity: u32, price: Decimal) -> NewOrderItem {
        NewOrderItem {
            menu_item_id: MenuItemId(menu_item_id),
            menu_item_name: name.to_string(),
            quantity,
            price,
        }
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL (TEST_DATABASE_URL)
    async fn test_order_and_items_round_trip() {
        let store = PgOrderStore::new(testing::pool().await);
        let user_id = UserId(testing::unique_id());

        let created = store
            .create(OrderCreate {
                user_id,
                items: vec![
                    line(2, "Scone", 1, Decimal::new(325, 2)),
                    line(1, "Tea", 2, Decimal::new(2505, 3)),
                ],
            })
            .await
            .unwrap();

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.status, DEFAULT_ORDER_STATUS);
        let names: Vec<_> = created.items.iter().map(|i| i.menu_item_name.as_str()).collect();
        assert_eq!(names, vec!["Scone", "Tea"]);
        assert!(created.items.iter().all(|i| i.order_id == created.id));
        assert_eq!(created.items[1].price.to_string(), "2.505");

        assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));

        let updated = store
            .update(created.id, OrderUpdate { status: "completed".into() })
            .await
            .unwrap();
        assert_eq!(updated.status, "completed");
        assert_eq!(updated.items, created.items);
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_loads_each_orders_own_items() {
        let store = PgOrderStore::new(testing::pool().await);
        let user_id = UserId(testing::unique_id());

        let first = store
            .create(OrderCreate {
                user_id,
                items: vec![line(1, "Tea", 1, Decimal::new(250, 2))],
            })
            .await
            .unwrap();
        let second = store
            .create(OrderCreate {
                user_id,
                items: vec![
                    line(2, "Scone", 1, Decimal::new(325, 2)),
                    line(3, "Muffin", 4, Decimal::new(300, 2)),
                ],
            })
            .await
            .unwrap();
        let empty = store
            .create(OrderCreate { user_id, items: vec![] })
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        for order in [&first, &second, &empty] {
            let found = listed.iter().find(|o| o.id == order.id).expect("order listed");
            assert_eq!(found, order);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_failed_item_rolls_back_the_whole_order() {
        let pool = testing::pool().await;
        let store = PgOrderStore::new(pool.clone());
        let user_id = testing::unique_id();
        let marker = testing::unique("first-line");

        // The first item is inserted; the second cannot be, so nothing may remain
        let err = store
            .create(OrderCreate {
                user_id: UserId(user_id),
                items: vec![
                    line(1, &marker, 1, Decimal::new(250, 2)),
                    line(u32::MAX, "Unreachable", 1, Decimal::new(250, 2)),
                ],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(db_id(user_id).unwrap())
            .fetch_one(&pool)
            .await
            .unwrap();
        let items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE menu_item_name = $1")
                .bind(&marker)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!((orders, items), (0, 0));
    }

    #[tokio::test]
    #[ignore]
    async fn test_soft_delete_hides_order_and_items() {
        let pool = testing::pool().await;
        let store = PgOrderStore::new(pool.clone());
        let order = store
            .create(OrderCreate {
                user_id: UserId(testing::unique_id()),
                items: vec![line(1, "Tea", 1, Decimal::new(250, 2))],
            })
            .await
            .unwrap();

        store.delete(order.id).await.unwrap();

        assert_eq!(store.get(order.id).await.unwrap(), None);
        assert!(!store.list().await.unwrap().iter().any(|o| o.id == order.id));
        assert_eq!(
            store.delete(order.id).await,
            Err(StoreError::NotFound(order.id.to_string()))
        );
        assert!(matches!(
            store
                .update(order.id, OrderUpdate { status: "completed".into() })
                .await,
            Err(StoreError::NotFound(_))
        ));

        let live_items: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM order_items WHERE order_id = $1 AND deleted_at IS NULL",
        )
        .bind(db_id(order.id.0).unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(live_items, 0);
    }
}
