//! `user.v1.UserService`: messages, paths and the router.

use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::rpc::{parse, DeleteResponse, Status};
use crate::user_service::UserService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

pub const CREATE_USER: &str = "/user.v1.UserService/CreateUser";
pub const GET_USER: &str = "/user.v1.UserService/GetUser";
pub const GET_USERS: &str = "/user.v1.UserService/GetUsers";
pub const UPDATE_USER: &str = "/user.v1.UserService/UpdateUser";
pub const DELETE_USER: &str = "/user.v1.UserService/DeleteUser";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_cafe_owner: bool,
}

impl From<UserCreate> for CreateUserRequest {
    fn from(params: UserCreate) -> Self {
        Self {
            name: params.name,
            email: params.email,
            is_cafe_owner: params.is_cafe_owner,
        }
    }
}

impl From<CreateUserRequest> for UserCreate {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            is_cafe_owner: request.is_cafe_owner,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub id: UserId,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GetUsersRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_cafe_owner: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Routes every `UserService` method to `service`.
pub fn router(service: UserService) -> Router {
    Router::new()
        .route(CREATE_USER, post(create_user))
        .route(GET_USER, post(get_user))
        .route(GET_USERS, post(get_users))
        .route(UPDATE_USER, post(update_user))
        .route(DELETE_USER, post(delete_user))
        .with_state(service)
}

async fn create_user(
    State(service): State<UserService>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, Status> {
    let request = parse(body)?;
    let user = service.create_user(request.into()).await?;
    Ok(Json(UserResponse { user }))
}

async fn get_user(
    State(service): State<UserService>,
    body: Result<Json<GetUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, Status> {
    let request = parse(body)?;
    let user = service.get_user(request.id).await?;
    Ok(Json(UserResponse { user }))
}

async fn get_users(
    State(service): State<UserService>,
    body: Result<Json<GetUsersRequest>, JsonRejection>,
) -> Result<Json<UsersResponse>, Status> {
    parse(body)?;
    let users = service.list_users().await?;
    Ok(Json(UsersResponse { users }))
}

async fn update_user(
    State(service): State<UserService>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, Status> {
    let request = parse(body)?;
    let update = UserUpdate {
        name: request.name,
        email: request.email,
        is_cafe_owner: request.is_cafe_owner,
    };
    let user = service.update_user(request.id, update).await?;
    Ok(Json(UserResponse { user }))
}

async fn delete_user(
    State(service): State<UserService>,
    body: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, Status> {
    let request = parse(body)?;
    service.delete_user(request.id).await?;
    Ok(Json(DeleteResponse::ok()))
}
