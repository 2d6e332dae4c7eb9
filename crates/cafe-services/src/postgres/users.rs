//! `users` table.

use super::{db_id, row_id, store_error};
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_actor::{RecordStore, StoreError};
use sqlx::PgPool;
use tracing::instrument;

const USER_COLUMNS: &str = "id, name, email, is_cafe_owner, created_at, updated_at";

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    is_cafe_owner: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: UserId(row_id(row.id)?),
            name: row.name,
            email: row.email,
            is_cafe_owner: row.is_cafe_owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Users backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<User> for PgUserStore {
    #[instrument(skip(self, params))]
    async fn create(&self, params: UserCreate) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (name, email, is_cafe_owner) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&params.name)
        .bind(&params.email)
        .bind(params.is_cafe_owner)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let Some(id) = db_id(id.0) else {
            return Ok(None);
        };
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: UserId, update: UserUpdate) -> Result<User, StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;

        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET name = $2, email = $3, is_cafe_owner = $4, updated_at = now() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {USER_COLUMNS}"
        ))
        .bind(key)
        .bind(&update.name)
        .bind(&update.email)
        .bind(update.is_cafe_owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.ok_or_else(not_found)?.try_into()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let not_found = || StoreError::NotFound(id.to_string());
        let key = db_id(id.0).ok_or_else(not_found)?;

        let result = sqlx::query(
            "UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
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
