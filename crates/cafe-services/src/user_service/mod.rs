//! # User Service
//!
//! CRUD over [`User`] records. The service holds nothing but its store handle, so it is
//! cheap to clone and every request runs independently.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_actor::Record) implementation for [`User`]
//! - [`error`] - [`UserError`] and its mapping onto the RPC [`Code`](crate::rpc::Code)s
//!
//! ## Usage
//!
//! ```rust
//! use cafe_services::model::{User, UserCreate};
//! use cafe_services::user_service::UserService;
//! use record_actor::ResourceActor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, store) = ResourceActor::<User>::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let users = UserService::new(Arc::new(store));
//!     let alice = users.create_user(UserCreate::new("Alice", "alice@example.com")).await?;
//!     assert_eq!(users.get_user(alice.id).await?.name, "Alice");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{User, UserCreate, UserId, UserUpdate};
use record_actor::{RecordStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Service over the `users` table.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn RecordStore<User>>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore<User>>) -> Self {
        Self { store }
    }

    /// Creates a user. Blank name or email is a validation error; anything else the store
    /// rejects (a duplicate email, a dead connection) is a database error.
    #[instrument(skip(self, params))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!(?params, "create_user called");
        let user = self.store.create(params).await.map_err(|e| match e {
            StoreError::Validation(msg) => UserError::ValidationError(msg),
            other => UserError::DatabaseError(format!("failed to create user: {other}")),
        })?;
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.store
            .get(id)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.store
            .list()
            .await
            .map_err(|e| UserError::DatabaseError(format!("failed to get users: {e}")))
    }

    /// Overwrites every mutable field of an existing user.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!(?update, "update_user called");
        let user = self.store.update(id, update).await.map_err(|e| match e {
            StoreError::NotFound(_) => UserError::NotFound(id),
            StoreError::Validation(msg) => UserError::ValidationError(msg),
            other => UserError::DatabaseError(format!("failed to update user: {other}")),
        })?;
        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => UserError::NotFound(id),
            other => UserError::DatabaseError(format!("failed to delete user: {other}")),
        })?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::Code;
    use record_actor::mock::MockClient;
    use record_actor::ResourceActor;

    fn service() -> UserService {
        let (actor, store) = ResourceActor::<User>::new(8);
        tokio::spawn(actor.run());
        UserService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_user_crud() {
        let users = service();

        let alice = users
            .create_user(UserCreate::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(alice.id, UserId(1));
        assert!(!alice.is_cafe_owner);

        let updated = users
            .update_user(
                alice.id,
                UserUpdate {
                    name: "Alice B".into(),
                    email: "alice@example.com".into(),
                    is_cafe_owner: true,
                },
            )
            .await
            .unwrap();
        assert!(updated.is_cafe_owner);
        assert_eq!(users.list_users().await.unwrap(), vec![updated]);

        users.delete_user(alice.id).await.unwrap();
        let err = users.get_user(alice.id).await.unwrap_err();
        assert_eq!(err, UserError::NotFound(alice.id));
        assert_eq!(err.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_blank_email_is_invalid_input() {
        let users = service();
        let err = users
            .create_user(UserCreate::new("Alice", "  "))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::ValidationError("email is required".into()));
        assert_eq!(err.code(), Code::InvalidInput);
    }

    #[tokio::test]
    async fn test_tab_only_name_is_invalid_input() {
        let users = service();
        let err = users
            .create_user(UserCreate::new("\t", "tab@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::ValidationError("name is required".into()));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_internal() {
        let users = service();
        users
            .create_user(UserCreate::new("Alice", "alice@example.com"))
            .await
            .unwrap();
        let err = users
            .create_user(UserCreate::new("Alicia", "alice@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_missing_user_on_update_and_delete() {
        let users = service();
        let update = UserUpdate {
            name: "Ghost".into(),
            email: "ghost@example.com".into(),
            is_cafe_owner: false,
        };
        assert_eq!(
            users.update_user(UserId(9), update).await.unwrap_err(),
            UserError::NotFound(UserId(9))
        );
        assert_eq!(
            users.delete_user(UserId(9)).await.unwrap_err(),
            UserError::NotFound(UserId(9))
        );
    }

    #[tokio::test]
    async fn test_store_failure_on_get_is_internal() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(1))
            .return_err(StoreError::Backend("connection reset".into()));

        let users = UserService::new(Arc::new(mock.client()));
        let err = users.get_user(UserId(1)).await.unwrap_err();
        assert_eq!(err.code(), Code::Internal);
        mock.verify();
    }
}
