//! Error types for the User service.

use crate::model::UserId;
use crate::rpc::{Code, Status};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// A required field was missing or blank.
    #[error("invalid user: {0}")]
    ValidationError(String),

    /// The store failed, including unique-email violations.
    #[error("user store error: {0}")]
    DatabaseError(String),
}

impl UserError {
    pub fn code(&self) -> Code {
        match self {
            UserError::NotFound(_) => Code::NotFound,
            UserError::ValidationError(_) => Code::InvalidInput,
            UserError::DatabaseError(_) => Code::Internal,
        }
    }
}

impl From<UserError> for Status {
    fn from(e: UserError) -> Self {
        Status::new(e.code(), e.to_string())
    }
}
