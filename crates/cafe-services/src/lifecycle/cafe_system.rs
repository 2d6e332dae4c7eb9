use crate::lifecycle::LaunchError;
use crate::menu_service::MenuService;
use crate::model::{MenuItem, Order, User};
use crate::order_service::OrderService;
use crate::user_service::UserService;
use record_actor::ResourceActor;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Mailbox capacity of each in-process store.
pub const STORE_BUFFER: usize = 32;

/// All three services running in one process over actor stores.
///
/// `CafeSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store actors
/// - **Dependency Wiring**: the order service gets the user and menu services as its peers
///
/// # Example
///
/// ```rust
/// use cafe_services::lifecycle::CafeSystem;
/// use cafe_services::model::{MenuItemCreate, OrderLine, UserCreate};
/// use rust_decimal::Decimal;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = CafeSystem::new();
///
///     let user = system.users.create_user(UserCreate::new("Alice", "alice@example.com")).await?;
///     let tea = system.menu.create_menu_item(MenuItemCreate::new("Tea", Decimal::new(250, 2))).await?;
///     let order = system.orders.create_order(user.id, vec![OrderLine::new(tea.id, 2)]).await?;
///     assert_eq!(order.status, "pending");
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct CafeSystem {
    pub users: UserService,
    pub menu: MenuService,
    pub orders: OrderService,

    /// Task handles for the store actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl Default for CafeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CafeSystem {
    /// Spawns a store per record type and wires the services together.
    pub fn new() -> Self {
        // 1. Create stores
        let (user_actor, user_store) = ResourceActor::<User>::new(STORE_BUFFER);
        let (menu_actor, menu_store) = ResourceActor::<MenuItem>::new(STORE_BUFFER);
        let (order_actor, order_store) = ResourceActor::<Order>::new(STORE_BUFFER);

        // 2. Start them
        let handles = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(menu_actor.run()),
            tokio::spawn(order_actor.run()),
        ];

        // 3. Wire services; orders look users and menu items up in-process
        let users = UserService::new(Arc::new(user_store));
        let menu = MenuService::new(Arc::new(menu_store));
        let orders = OrderService::new(
            Arc::new(order_store),
            Arc::new(users.clone()),
            Arc::new(menu.clone()),
        );

        Self {
            users,
            menu,
            orders,
            handles,
        }
    }

    /// Drops every service handle and waits for the stores to stop.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Task`] if a store task panicked.
    pub async fn shutdown(self) -> Result<(), LaunchError> {
        info!("Shutting down cafe system...");

        // Dropping the services drops every store client, closing the mailboxes.
        drop(self.orders);
        drop(self.users);
        drop(self.menu);

        for handle in self.handles {
            handle.await?;
        }

        info!("Cafe system shut down");
        Ok(())
    }
}
