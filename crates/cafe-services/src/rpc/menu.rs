//! `menu.v1.MenuService`: messages, paths and the router.

use crate::menu_service::MenuService;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use crate::rpc::{parse, DeleteResponse, Status};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const CREATE_MENU_ITEM: &str = "/menu.v1.MenuService/CreateMenuItem";
pub const GET_MENU_ITEM: &str = "/menu.v1.MenuService/GetMenuItem";
pub const GET_MENU_ITEMS: &str = "/menu.v1.MenuService/GetMenuItems";
pub const UPDATE_MENU_ITEM: &str = "/menu.v1.MenuService/UpdateMenuItem";
pub const DELETE_MENU_ITEM: &str = "/menu.v1.MenuService/DeleteMenuItem";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

impl From<MenuItemCreate> for CreateMenuItemRequest {
    fn from(params: MenuItemCreate) -> Self {
        Self {
            name: params.name,
            description: params.description,
            price: params.price,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetMenuItemRequest {
    pub id: MenuItemId,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GetMenuItemsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteMenuItemRequest {
    pub id: MenuItemId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemResponse {
    pub menu_item: MenuItem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemsResponse {
    pub menu_items: Vec<MenuItem>,
}

/// Routes every `MenuService` method to `service`.
pub fn router(service: MenuService) -> Router {
    Router::new()
        .route(CREATE_MENU_ITEM, post(create_menu_item))
        .route(GET_MENU_ITEM, post(get_menu_item))
        .route(GET_MENU_ITEMS, post(get_menu_items))
        .route(UPDATE_MENU_ITEM, post(update_menu_item))
        .route(DELETE_MENU_ITEM, post(delete_menu_item))
        .with_state(service)
}

async fn create_menu_item(
    State(service): State<MenuService>,
    body: Result<Json<CreateMenuItemRequest>, JsonRejection>,
) -> Result<Json<MenuItemResponse>, Status> {
    let request = parse(body)?;
    let params = MenuItemCreate {
        name: request.name,
        description: request.description,
        price: request.price,
    };
    let menu_item = service.create_menu_item(params).await?;
    Ok(Json(MenuItemResponse { menu_item }))
}

async fn get_menu_item(
    State(service): State<MenuService>,
    body: Result<Json<GetMenuItemRequest>, JsonRejection>,
) -> Result<Json<MenuItemResponse>, Status> {
    let request = parse(body)?;
    let menu_item = service.get_menu_item(request.id).await?;
    Ok(Json(MenuItemResponse { menu_item }))
}

async fn get_menu_items(
    State(service): State<MenuService>,
    body: Result<Json<GetMenuItemsRequest>, JsonRejection>,
) -> Result<Json<MenuItemsResponse>, Status> {
    parse(body)?;
    let menu_items = service.list_menu_items().await?;
    Ok(Json(MenuItemsResponse { menu_items }))
}

async fn update_menu_item(
    State(service): State<MenuService>,
    body: Result<Json<UpdateMenuItemRequest>, JsonRejection>,
) -> Result<Json<MenuItemResponse>, Status> {
    let request = parse(body)?;
    let update = MenuItemUpdate {
        name: request.name,
        description: request.description,
        price: request.price,
    };
    let menu_item = service.update_menu_item(request.id, update).await?;
    Ok(Json(MenuItemResponse { menu_item }))
}

async fn delete_menu_item(
    State(service): State<MenuService>,
    body: Result<Json<DeleteMenuItemRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, Status> {
    let request = parse(body)?;
    service.delete_menu_item(request.id).await?;
    Ok(Json(DeleteResponse::ok()))
}
