//! Record trait implementation for the User domain type.
//!
//! This module contains the [`Record`] trait implementation that lets [`User`] be
//! hosted by the generic [`ResourceActor`](record_actor::ResourceActor).
//!
//! See the trait implementation on [`User`] for method documentation.

use crate::model::{require, MissingField, User, UserCreate, UserId, UserUpdate};
use chrono::{DateTime, Utc};
use record_actor::{CreateContext, Record};

impl Record for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Error = MissingField;

    /// Creates a new User from creation parameters.
    ///
    /// Name and email are required.
    fn from_create_params(
        id: UserId,
        params: UserCreate,
        ctx: &mut CreateContext<'_>,
    ) -> Result<Self, MissingField> {
        require("name", &params.name)?;
        require("email", &params.email)?;

        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            is_cafe_owner: params.is_cafe_owner,
            created_at: ctx.now(),
            updated_at: ctx.now(),
        })
    }

    /// Overwrites name, email and the owner flag.
    fn on_update(&mut self, update: UserUpdate, now: DateTime<Utc>) -> Result<(), MissingField> {
        require("name", &update.name)?;
        require("email", &update.email)?;

        self.name = update.name;
        self.email = update.email;
        self.is_cafe_owner = update.is_cafe_owner;
        self.updated_at = now;
        Ok(())
    }

    /// Email addresses are unique across live users.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }
}
