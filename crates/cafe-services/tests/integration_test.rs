use cafe_services::lifecycle::CafeSystem;
use cafe_services::model::{
    MenuItemCreate, MenuItemId, MenuItemUpdate, OrderId, OrderLine, UserCreate, UserId,
};
use cafe_services::order_service::OrderError;
use cafe_services::rpc::Code;
use rust_decimal::Decimal;

fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Full end-to-end test with all real stores.
#[tokio::test]
async fn test_order_snapshots_menu_item() {
    let system = CafeSystem::new();

    let user = system
        .users
        .create_user(UserCreate::new("Alice", "alice@example.com"))
        .await
        .expect("Failed to create user");
    let tea = system
        .menu
        .create_menu_item(MenuItemCreate::new("Tea", price(250)))
        .await
        .expect("Failed to create menu item");

    let order = system
        .orders
        .create_order(user.id, vec![OrderLine::new(tea.id, 2)])
        .await
        .expect("Failed to create order");

    assert_eq!(order.user_id, user.id);
    assert_eq!(order.status, "pending");
    assert_eq!(order.items.len(), 1);
    let item = &order.items[0];
    assert_eq!(item.order_id, order.id);
    assert_eq!(item.menu_item_id, tea.id);
    assert_eq!(item.menu_item_name, "Tea");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.price, price(250));

    // Reads return the same aggregate
    assert_eq!(system.orders.get_order(order.id).await.unwrap(), order);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_menu_changes_do_not_touch_existing_orders() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Bob", "bob@example.com"))
        .await
        .unwrap();
    let latte = system
        .menu
        .create_menu_item(MenuItemCreate::new("Latte", price(350)))
        .await
        .unwrap();
    let order = system
        .orders
        .create_order(user.id, vec![OrderLine::new(latte.id, 1)])
        .await
        .unwrap();

    system
        .menu
        .update_menu_item(
            latte.id,
            MenuItemUpdate {
                name: "Grande Latte".into(),
                description: String::new(),
                price: price(495),
            },
        )
        .await
        .unwrap();
    system.menu.delete_menu_item(latte.id).await.unwrap();

    let stored = system.orders.get_order(order.id).await.unwrap();
    assert_eq!(stored.items[0].menu_item_name, "Latte");
    assert_eq!(stored.items[0].price, price(350));

    // New orders see the change: the item is gone
    let err = system
        .orders
        .create_order(user.id, vec![OrderLine::new(latte.id, 1)])
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidInput);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_user_is_rejected_before_anything_is_written() {
    let system = CafeSystem::new();
    let tea = system
        .menu
        .create_menu_item(MenuItemCreate::new("Tea", price(250)))
        .await
        .unwrap();

    let err = system
        .orders
        .create_order(UserId(42), vec![OrderLine::new(tea.id, 1)])
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidUser(_)));
    assert_eq!(err.code(), Code::InvalidInput);
    assert!(err.to_string().starts_with("user not found: "));
    assert!(system.orders.list_orders().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_one_bad_line_aborts_the_whole_order() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Carol", "carol@example.com"))
        .await
        .unwrap();
    let tea = system
        .menu
        .create_menu_item(MenuItemCreate::new("Tea", price(250)))
        .await
        .unwrap();

    let err = system
        .orders
        .create_order(
            user.id,
            vec![
                OrderLine::new(tea.id, 1),
                OrderLine::new(MenuItemId(99), 1),
                OrderLine::new(tea.id, 3),
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidMenuItem(MenuItemId(99), _)));
    assert!(err.to_string().starts_with("menu item 99 not found: "));
    assert!(system.orders.list_orders().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_items_keep_input_order_and_duplicates() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Dan", "dan@example.com"))
        .await
        .unwrap();
    let tea = system
        .menu
        .create_menu_item(MenuItemCreate::new("Tea", price(250)))
        .await
        .unwrap();
    let scone = system
        .menu
        .create_menu_item(MenuItemCreate::new("Scone", price(325)))
        .await
        .unwrap();

    let order = system
        .orders
        .create_order(
            user.id,
            vec![
                OrderLine::new(scone.id, 1),
                OrderLine::new(tea.id, 2),
                OrderLine::new(scone.id, 0),
            ],
        )
        .await
        .unwrap();

    let names: Vec<_> = order
        .items
        .iter()
        .map(|i| (i.menu_item_name.as_str(), i.quantity))
        .collect();
    assert_eq!(names, vec![("Scone", 1), ("Tea", 2), ("Scone", 0)]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_order_is_accepted() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Eve", "eve@example.com"))
        .await
        .unwrap();

    let order = system.orders.create_order(user.id, vec![]).await.unwrap();
    assert!(order.items.is_empty());
    assert_eq!(order.status, "pending");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_status_update_get_and_delete() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Finn", "finn@example.com"))
        .await
        .unwrap();
    let tea = system
        .menu
        .create_menu_item(MenuItemCreate::new("Tea", price(250)))
        .await
        .unwrap();
    let order = system
        .orders
        .create_order(user.id, vec![OrderLine::new(tea.id, 1)])
        .await
        .unwrap();

    // Any status is accepted, in any order
    let done = system
        .orders
        .update_order_status(order.id, "completed")
        .await
        .unwrap();
    assert_eq!(done.status, "completed");
    assert_eq!(done.items, order.items);
    assert_eq!(done.created_at, order.created_at);

    let back = system
        .orders
        .update_order_status(order.id, "pending")
        .await
        .unwrap();
    assert_eq!(back.status, "pending");

    let missing = system
        .orders
        .update_order_status(OrderId(999), "completed")
        .await
        .unwrap_err();
    assert_eq!(missing, OrderError::NotFound(OrderId(999)));
    assert_eq!(missing.code(), Code::NotFound);

    system.orders.delete_order(order.id).await.unwrap();
    assert_eq!(
        system.orders.get_order(order.id).await.unwrap_err(),
        OrderError::NotFound(order.id)
    );
    assert_eq!(
        system.orders.delete_order(order.id).await.unwrap_err(),
        OrderError::NotFound(order.id)
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_lists_start_empty() {
    let system = CafeSystem::new();
    assert!(system.users.list_users().await.unwrap().is_empty());
    assert!(system.menu.list_menu_items().await.unwrap().is_empty());
    assert!(system.orders.list_orders().await.unwrap().is_empty());
    system.shutdown().await.unwrap();
}

/// Concurrent orders on the same menu item each snapshot independently.
#[tokio::test]
async fn test_concurrent_orders() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Gus", "gus@example.com"))
        .await
        .unwrap();
    let mocha = system
        .menu
        .create_menu_item(MenuItemCreate::new("Mocha", price(400)))
        .await
        .unwrap();

    let mut handles = vec![];
    for quantity in 1..=10 {
        let orders = system.orders.clone();
        let user_id = user.id;
        let menu_item_id = mocha.id;
        handles.push(tokio::spawn(async move {
            orders
                .create_order(user_id, vec![OrderLine::new(menu_item_id, quantity)])
                .await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        let order = handle.await.unwrap().expect("order should succeed");
        assert_eq!(order.items[0].price, price(400));
        ids.push(order.id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10, "every order gets its own id");

    let orders = system.orders.list_orders().await.unwrap();
    let total: u32 = orders.iter().flat_map(|o| &o.items).map(|i| i.quantity).sum();
    assert_eq!(total, 55);

    system.shutdown().await.unwrap();
}

/// Sub-cent prices pass through the menu and into the snapshot unchanged.
#[tokio::test]
async fn test_prices_keep_their_scale() {
    let system = CafeSystem::new();
    let user = system
        .users
        .create_user(UserCreate::new("Hana", "hana@example.com"))
        .await
        .unwrap();
    let exact = Decimal::new(2505, 3);
    let matcha = system
        .menu
        .create_menu_item(MenuItemCreate::new("Matcha", exact))
        .await
        .unwrap();
    assert_eq!(matcha.price.to_string(), "2.505");

    let order = system
        .orders
        .create_order(user.id, vec![OrderLine::new(matcha.id, 3)])
        .await
        .unwrap();
    assert_eq!(order.items[0].price, exact);
    assert_eq!(order.items[0].price.to_string(), "2.505");

    system.shutdown().await.unwrap();
}
