//! Error types for the Menu service.

use crate::model::MenuItemId;
use crate::rpc::{Code, Status};
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item was not found.
    #[error("menu item not found: {0}")]
    NotFound(MenuItemId),

    /// A required field was missing or blank.
    #[error("invalid menu item: {0}")]
    ValidationError(String),

    /// The store failed.
    #[error("menu store error: {0}")]
    DatabaseError(String),
}

impl MenuError {
    pub fn code(&self) -> Code {
        match self {
            MenuError::NotFound(_) => Code::NotFound,
            MenuError::ValidationError(_) => Code::InvalidInput,
            MenuError::DatabaseError(_) => Code::Internal,
        }
    }
}

impl From<MenuError> for Status {
    fn from(e: MenuError) -> Self {
        Status::new(e.code(), e.to_string())
    }
}
