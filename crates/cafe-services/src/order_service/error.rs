//! Error types for the Order service.

use crate::model::{MenuItemId, OrderId};
use crate::rpc::{Code, Status};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The user lookup failed, for whatever reason. Carries the peer's failure.
    #[error("user not found: {0}")]
    InvalidUser(String),

    /// A menu item lookup failed. Carries the failing ID and the peer's failure.
    #[error("menu item {0} not found: {1}")]
    InvalidMenuItem(MenuItemId, String),

    /// The order store failed.
    #[error("order store error: {0}")]
    DatabaseError(String),
}

impl OrderError {
    pub fn code(&self) -> Code {
        match self {
            OrderError::NotFound(_) => Code::NotFound,
            OrderError::InvalidUser(_) | OrderError::InvalidMenuItem(..) => Code::InvalidInput,
            OrderError::DatabaseError(_) => Code::Internal,
        }
    }
}

impl From<OrderError> for Status {
    fn from(e: OrderError) -> Self {
        Status::new(e.code(), e.to_string())
    }
}
