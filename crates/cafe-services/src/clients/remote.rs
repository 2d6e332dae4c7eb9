//! # RPC Clients
//!
//! Thin typed wrappers over [`RpcChannel`], one per service. Each method posts a request
//! message to the matching path and decodes either the response message or a [`Status`].
//!
//! Transport failures (connection refused, reset, DNS) become [`Code::Unavailable`]; a
//! response body that is not a valid status becomes whatever code its HTTP status implies.

use crate::clients::{MenuCatalog, UserDirectory};
use crate::model::{
    MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Order, OrderId, OrderLine, User,
    UserCreate, UserId, UserUpdate,
};
use crate::rpc::{menu, order, user, Code, DeleteResponse, Status};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// A peer address with a scheme other than plain `http`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported peer address `{0}`: only plain http is supported")]
pub struct UnsupportedAddress(pub String);

/// A connection to one service: an HTTP client and the service's base URL.
#[derive(Debug, Clone)]
pub struct RpcChannel {
    http: reqwest::Client,
    base_url: String,
}

impl RpcChannel {
    /// `addr` is `host:port` (as in `USER_SERVICE_ADDR`) or a full `http://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedAddress`] for any other scheme, `https://` included; the client
    /// is built without a TLS stack.
    pub fn new(addr: &str) -> Result<Self, UnsupportedAddress> {
        Self::with_client(reqwest::Client::new(), addr)
    }

    /// Shares an existing connection pool.
    pub fn with_client(http: reqwest::Client, addr: &str) -> Result<Self, UnsupportedAddress> {
        let addr = addr.trim_end_matches('/');
        let base_url = match addr.split_once("://") {
            None => format!("http://{addr}"),
            Some((scheme, _)) if scheme.eq_ignore_ascii_case("http") => addr.to_string(),
            Some(_) => return Err(UnsupportedAddress(addr.to_string())),
        };
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs one unary call.
    pub async fn call<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, Status>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        debug!(path, base_url = %self.base_url, "RPC call");
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(path, error = %e, "RPC transport failure");
                Status::unavailable(format!("{path}: {e}"))
            })?;

        let http_status = response.status();
        if http_status.is_success() {
            return response
                .json::<Resp>()
                .await
                .map_err(|e| Status::internal(format!("malformed response from {path}: {e}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Status::unavailable(format!("{path}: {e}")))?;
        Err(serde_json::from_slice::<Status>(&body).unwrap_or_else(|_| {
            Status::new(
                Code::from_http_status(http_status),
                String::from_utf8_lossy(&body).into_owned(),
            )
        }))
    }
}

/// Client for `user.v1.UserService`.
#[derive(Debug, Clone)]
pub struct RpcUserClient {
    channel: RpcChannel,
}

impl RpcUserClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }

    pub async fn create_user(&self, params: UserCreate) -> Result<User, Status> {
        let response: user::UserResponse = self
            .channel
            .call(user::CREATE_USER, &user::CreateUserRequest::from(params))
            .await?;
        Ok(response.user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, Status> {
        let response: user::UsersResponse = self
            .channel
            .call(user::GET_USERS, &user::GetUsersRequest {})
            .await?;
        Ok(response.users)
    }

    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, Status> {
        let request = user::UpdateUserRequest {
            id,
            name: update.name,
            email: update.email,
            is_cafe_owner: update.is_cafe_owner,
        };
        let response: user::UserResponse = self.channel.call(user::UPDATE_USER, &request).await?;
        Ok(response.user)
    }

    pub async fn delete_user(&self, id: UserId) -> Result<bool, Status> {
        let response: DeleteResponse = self
            .channel
            .call(user::DELETE_USER, &user::DeleteUserRequest { id })
            .await?;
        Ok(response.success)
    }
}

#[async_trait]
impl UserDirectory for RpcUserClient {
    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<User, Status> {
        let response: user::UserResponse = self
            .channel
            .call(user::GET_USER, &user::GetUserRequest { id })
            .await?;
        Ok(response.user)
    }
}

/// Client for `menu.v1.MenuService`.
#[derive(Debug, Clone)]
pub struct RpcMenuClient {
    channel: RpcChannel,
}

impl RpcMenuClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }

    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, Status> {
        let response: menu::MenuItemResponse = self
            .channel
            .call(menu::CREATE_MENU_ITEM, &menu::CreateMenuItemRequest::from(params))
            .await?;
        Ok(response.menu_item)
    }

    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>, Status> {
        let response: menu::MenuItemsResponse = self
            .channel
            .call(menu::GET_MENU_ITEMS, &menu::GetMenuItemsRequest {})
            .await?;
        Ok(response.menu_items)
    }

    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, Status> {
        let request = menu::UpdateMenuItemRequest {
            id,
            name: update.name,
            description: update.description,
            price: update.price,
        };
        let response: menu::MenuItemResponse =
            self.channel.call(menu::UPDATE_MENU_ITEM, &request).await?;
        Ok(response.menu_item)
    }

    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<bool, Status> {
        let response: DeleteResponse = self
            .channel
            .call(menu::DELETE_MENU_ITEM, &menu::DeleteMenuItemRequest { id })
            .await?;
        Ok(response.success)
    }
}

#[async_trait]
impl MenuCatalog for RpcMenuClient {
    #[instrument(skip(self))]
    async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, Status> {
        let response: menu::MenuItemResponse = self
            .channel
            .call(menu::GET_MENU_ITEM, &menu::GetMenuItemRequest { id })
            .await?;
        Ok(response.menu_item)
    }
}

/// Client for `order.v1.OrderService`.
#[derive(Debug, Clone)]
pub struct RpcOrderClient {
    channel: RpcChannel,
}

impl RpcOrderClient {
    pub fn new(channel: RpcChannel) -> Self {
        Self { channel }
    }

    #[instrument(skip(self, items))]
    pub async fn create_order(&self, user_id: UserId, items: Vec<OrderLine>) -> Result<Order, Status> {
        let request = order::CreateOrderRequest { user_id, items };
        let response: order::OrderResponse = self.channel.call(order::CREATE_ORDER, &request).await?;
        Ok(response.order)
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, Status> {
        let response: order::OrderResponse = self
            .channel
            .call(order::GET_ORDER, &order::GetOrderRequest { id })
            .await?;
        Ok(response.order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, Status> {
        let response: order::OrdersResponse = self
            .channel
            .call(order::GET_ORDERS, &order::GetOrdersRequest {})
            .await?;
        Ok(response.orders)
    }

    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: impl Into<String>,
    ) -> Result<Order, Status> {
        let request = order::UpdateOrderStatusRequest {
            id,
            status: status.into(),
        };
        let response: order::OrderResponse = self
            .channel
            .call(order::UPDATE_ORDER_STATUS, &request)
            .await?;
        Ok(response.order)
    }

    pub async fn delete_order(&self, id: OrderId) -> Result<bool, Status> {
        let response: DeleteResponse = self
            .channel
            .call(order::DELETE_ORDER, &order::DeleteOrderRequest { id })
            .await?;
        Ok(response.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_accepts_bare_and_full_addresses() {
        assert_eq!(
            RpcChannel::new("localhost:50051").unwrap().base_url(),
            "http://localhost:50051"
        );
        assert_eq!(
            RpcChannel::new("http://users.internal:8080/").unwrap().base_url(),
            "http://users.internal:8080"
        );
    }

    #[test]
    fn test_channel_rejects_tls_and_other_schemes() {
        assert_eq!(
            RpcChannel::new("https://users.internal:8443").unwrap_err(),
            UnsupportedAddress("https://users.internal:8443".into())
        );
        assert!(RpcChannel::new("grpc://users.internal:50051").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_unavailable() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let users = RpcUserClient::new(RpcChannel::new(&addr.to_string()).unwrap());
        let err = users.get_user(UserId(1)).await.unwrap_err();
        assert_eq!(err.code, Code::Unavailable);
    }
}
