//! In-process peers: the services answer lookups themselves.

use crate::clients::{MenuCatalog, UserDirectory};
use crate::menu_service::MenuService;
use crate::model::{MenuItem, MenuItemId, User, UserId};
use crate::rpc::Status;
use crate::user_service::UserService;
use async_trait::async_trait;

#[async_trait]
impl UserDirectory for UserService {
    async fn get_user(&self, id: UserId) -> Result<User, Status> {
        UserService::get_user(self, id).await.map_err(Status::from)
    }
}

#[async_trait]
impl MenuCatalog for MenuService {
    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, Status> {
        MenuService::get_menu_item(self, id)
            .await
            .map_err(Status::from)
    }
}
