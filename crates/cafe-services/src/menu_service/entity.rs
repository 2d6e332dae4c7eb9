//! Record trait implementation for [`MenuItem`].

use crate::model::{require, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, MissingField};
use chrono::{DateTime, Utc};
use record_actor::{CreateContext, Record};

impl Record for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Error = MissingField;

    fn from_create_params(
        id: MenuItemId,
        params: MenuItemCreate,
        ctx: &mut CreateContext<'_>,
    ) -> Result<Self, MissingField> {
        require("name", &params.name)?;

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            created_at: ctx.now(),
            updated_at: ctx.now(),
        })
    }

    /// Overwrites name, description and price. Orders already placed keep their snapshot.
    fn on_update(&mut self, update: MenuItemUpdate, now: DateTime<Utc>) -> Result<(), MissingField> {
        require("name", &update.name)?;

        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.updated_at = now;
        Ok(())
    }
}
