//! `menu_items` table.

use super::{db_id, row_id, store_error};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_actor::{RecordStore, StoreError};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

const MENU_ITEM_COLUMNS: &str = "id, name, description, price, created_at, updated_at";

/// Internal row type for menu item queries.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuItemRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: MenuItemId(row_id(row.id)?),
            name: row.name,
            description: row.description,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Menu items backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<MenuItem> for PgMenuStore {
    #[instrument(skip(self, params))]
    async fn create(&self, params: MenuItemCreate) -> Result<MenuItem, StoreError> {
        let row: MenuItemRow = sqlx::query_as(&format!(
            "INSERT INTO menu_items (name, description, price) VALUES ($1, $2, $3) \
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.price)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        let Some(id) = db_id(id.0) else {
            return Ok(None);
        };
        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(MenuItem::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<MenuItem>, StoreError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;

        let row: Option<MenuItemRow> = sqlx::query_as(&format!(
            "UPDATE menu_items SET name = $2, description = $3, price = $4, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(key)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.ok_or_else(not_found)?.try_into()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MenuItemId) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;

        let result = sqlx::query(
            "UPDATE menu_items SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postgres::testing;

    async fn store() -> PgMenuStore {
        PgMenuStore::new(testing::pool().await)
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL (TEST_DATABASE_URL)
    async fn test_price_is_stored_exactly() {
        let store = store().await;
        let price = Decimal::new(2505, 3);

        let created = store
            .create(MenuItemCreate::new("Tea", price))
            .await
            .unwrap();
        assert_eq!(created.price, price);
        assert_eq!(created.price.to_string(), "2.505");

        let updated = store
            .update(
                created.id,
                MenuItemUpdate {
                    name: "Tea".into(),
                    description: "Loose leaf".into(),
                    price: Decimal::new(312_345, 5),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price.to_string(), "3.12345");
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    #[ignore]
    async fn test_soft_deleted_item_reads_as_not_found() {
        let store = store().await;
        let item = store
            .create(MenuItemCreate::new("Scone", Decimal::new(325, 2)))
            .await
            .unwrap();

        store.delete(item.id).await.unwrap();

        assert_eq!(store.get(item.id).await.unwrap(), None);
        assert!(!store.list().await.unwrap().iter().any(|m| m.id == item.id));
        assert!(matches!(
            store.delete(item.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore]
    async fn test_blank_name_fails_the_check_constraint() {
        let store = store().await;
        let err = store
            .create(MenuItemCreate::new("\t\r\n", Decimal::ONE))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Validation("name is required".into()));
    }
}
