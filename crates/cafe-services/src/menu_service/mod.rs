//! # Menu Service
//!
//! CRUD over [`MenuItem`] records. Prices are decimals and are never validated beyond
//! what the store enforces.
//!
//! - [`entity`] - [`Record`](record_actor::Record) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use record_actor::{RecordStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Service over the `menu_items` table.
#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn RecordStore<MenuItem>>,
}

impl MenuService {
    pub fn new(store: Arc<dyn RecordStore<MenuItem>>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, params))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, MenuError> {
        debug!(?params, "create_menu_item called");
        let item = self.store.create(params).await.map_err(|e| match e {
            StoreError::Validation(msg) => MenuError::ValidationError(msg),
            other => MenuError::DatabaseError(format!("failed to create menu item: {other}")),
        })?;
        info!(menu_item_id = %item.id, price = %item.price, "Menu item created");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        self.store
            .get(id)
            .await
            .map_err(|e| MenuError::DatabaseError(e.to_string()))?
            .ok_or(MenuError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>, MenuError> {
        self.store
            .list()
            .await
            .map_err(|e| MenuError::DatabaseError(format!("failed to get menu items: {e}")))
    }

    #[instrument(skip(self, update))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!(?update, "update_menu_item called");
        let item = self.store.update(id, update).await.map_err(|e| match e {
            StoreError::NotFound(_) => MenuError::NotFound(id),
            StoreError::Validation(msg) => MenuError::ValidationError(msg),
            other => MenuError::DatabaseError(format!("failed to update menu item: {other}")),
        })?;
        info!(menu_item_id = %item.id, price = %item.price, "Menu item updated");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), MenuError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => MenuError::NotFound(id),
            other => MenuError::DatabaseError(format!("failed to delete menu item: {other}")),
        })?;
        info!(menu_item_id = %id, "Menu item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::Code;
    use record_actor::ResourceActor;
    use rust_decimal::Decimal;

    fn service() -> MenuService {
        let (actor, store) = ResourceActor::<MenuItem>::new(8);
        tokio::spawn(actor.run());
        MenuService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_menu_item_crud() {
        let menu = service();
        assert!(menu.list_menu_items().await.unwrap().is_empty());

        let latte = menu
            .create_menu_item(MenuItemCreate::new("Latte", Decimal::new(350, 2)))
            .await
            .unwrap();
        assert_eq!(latte.description, "");

        let updated = menu
            .update_menu_item(
                latte.id,
                MenuItemUpdate {
                    name: "Oat Latte".into(),
                    description: "with oat milk".into(),
                    price: Decimal::new(400, 2),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::new(4, 0));
        assert_eq!(menu.get_menu_item(latte.id).await.unwrap(), updated);

        menu.delete_menu_item(latte.id).await.unwrap();
        assert_eq!(
            menu.delete_menu_item(latte.id).await.unwrap_err(),
            MenuError::NotFound(latte.id)
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_on_create_and_update() {
        let menu = service();
        let err = menu
            .create_menu_item(MenuItemCreate::new("", Decimal::ONE))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidInput);

        let mocha = menu
            .create_menu_item(MenuItemCreate::new("Mocha", Decimal::ONE))
            .await
            .unwrap();
        let err = menu
            .update_menu_item(
                mocha.id,
                MenuItemUpdate {
                    name: String::new(),
                    description: String::new(),
                    price: Decimal::ONE,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, MenuError::ValidationError("name is required".into()));
        assert_eq!(menu.get_menu_item(mocha.id).await.unwrap().name, "Mocha");
    }
}
