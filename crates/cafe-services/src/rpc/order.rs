//! `order.v1.OrderService`: messages, paths and the router.

use crate::model::{Order, OrderId, OrderLine, UserId};
use crate::order_service::OrderService;
use crate::rpc::{parse, DeleteResponse, Status};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

pub const CREATE_ORDER: &str = "/order.v1.OrderService/CreateOrder";
pub const GET_ORDER: &str = "/order.v1.OrderService/GetOrder";
pub const GET_ORDERS: &str = "/order.v1.OrderService/GetOrders";
pub const UPDATE_ORDER_STATUS: &str = "/order.v1.OrderService/UpdateOrderStatus";
pub const DELETE_ORDER: &str = "/order.v1.OrderService/DeleteOrder";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetOrderRequest {
    pub id: OrderId,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GetOrdersRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub id: OrderId,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteOrderRequest {
    pub id: OrderId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// Routes every `OrderService` method to `service`.
pub fn router(service: OrderService) -> Router {
    Router::new()
        .route(CREATE_ORDER, post(create_order))
        .route(GET_ORDER, post(get_order))
        .route(GET_ORDERS, post(get_orders))
        .route(UPDATE_ORDER_STATUS, post(update_order_status))
        .route(DELETE_ORDER, post(delete_order))
        .with_state(service)
}

async fn create_order(
    State(service): State<OrderService>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, Status> {
    let request = parse(body)?;
    let order = service.create_order(request.user_id, request.items).await?;
    Ok(Json(OrderResponse { order }))
}

async fn get_order(
    State(service): State<OrderService>,
    body: Result<Json<GetOrderRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, Status> {
    let request = parse(body)?;
    let order = service.get_order(request.id).await?;
    Ok(Json(OrderResponse { order }))
}

async fn get_orders(
    State(service): State<OrderService>,
    body: Result<Json<GetOrdersRequest>, JsonRejection>,
) -> Result<Json<OrdersResponse>, Status> {
    parse(body)?;
    let orders = service.list_orders().await?;
    Ok(Json(OrdersResponse { orders }))
}

async fn update_order_status(
    State(service): State<OrderService>,
    body: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, Status> {
    let request = parse(body)?;
    let order = service
        .update_order_status(request.id, request.status)
        .await?;
    Ok(Json(OrderResponse { order }))
}

async fn delete_order(
    State(service): State<OrderService>,
    body: Result<Json<DeleteOrderRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, Status> {
    let request = parse(body)?;
    service.delete_order(request.id).await?;
    Ok(Json(DeleteResponse::ok()))
}
