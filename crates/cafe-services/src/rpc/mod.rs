//! # RPC Surface
//!
//! Each service is exposed as JSON-over-HTTP unary methods at
//! `POST /<package>.<Service>/<Method>`, one request message in and one response message
//! (or a [`Status`]) out.
//!
//! | Service | Methods |
//! |---------|---------|
//! | `user.v1.UserService` | `CreateUser`, `GetUser`, `GetUsers`, `UpdateUser`, `DeleteUser` |
//! | `menu.v1.MenuService` | `CreateMenuItem`, `GetMenuItem`, `GetMenuItems`, `UpdateMenuItem`, `DeleteMenuItem` |
//! | `order.v1.OrderService` | `CreateOrder`, `GetOrder`, `GetOrders`, `UpdateOrderStatus`, `DeleteOrder` |
//!
//! A body that does not decode into the request message is rejected with
//! [`Code::InvalidInput`] before the service is called.

pub mod menu;
pub mod order;
pub mod status;
pub mod user;

pub use status::{Code, Status};

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Response to every `Delete*` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Unwraps a JSON body, turning decode failures into `invalid_input`.
pub(crate) fn parse<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Status> {
    body.map(|Json(request)| request)
        .map_err(|rejection| Status::invalid_input(rejection.body_text()))
}
