//! Account REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::state::GatewayState;
use roster_users::{ProfileSelector, ProfileUpdate, UserView};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile update addressed by email.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// Selector; the email of the account to change.
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Profile update addressed by the username in the path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserByNameRequest {
    #[serde(alias = "newUsername")]
    pub new_username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserView> for UserResponse {
    fn from(user: UserView) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Create account routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users", get(list_users))
        .route("/api/users/update", put(update_profile))
        .route(
            "/api/users/:username",
            get(get_user_by_name)
                .put(update_user_by_name)
                .delete(delete_user),
        )
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing fields or duplicate email", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<RegisterRequest>,
) -> GatewayResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state
        .account_service()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<LoginRequest>,
) -> GatewayResult<Json<LoginResponse>> {
    let (user, token) = state
        .account_service()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: user.into(),
        token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, password hashes excluded", body = [UserResponse]),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<UserResponse>>> {
    let users = state.account_service().list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Display name, matched case-insensitively")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn get_user_by_name(
    State(state): State<Arc<GatewayState>>,
    Path(username): Path<String>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state.account_service().get_user_by_name(&username).await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/users/update",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<UpdateProfileRequest>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state
        .account_service()
        .update_profile(
            ProfileSelector::Email(&payload.email),
            ProfileUpdate {
                name: payload.name,
                email: None,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/users/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Display name, matched case-insensitively")),
    request_body = UpdateUserByNameRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn update_user_by_name(
    State(state): State<Arc<GatewayState>>,
    Path(username): Path<String>,
    Json(payload): Json<UpdateUserByNameRequest>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state
        .account_service()
        .update_profile(
            ProfileSelector::Name(&username),
            ProfileUpdate {
                name: payload.new_username,
                email: payload.email,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email of the account to delete")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<GatewayState>>,
    Path(email): Path<String>,
) -> GatewayResult<Json<MessageResponse>> {
    state.account_service().delete_user_by_email(&email).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
