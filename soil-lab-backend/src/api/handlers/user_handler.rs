// soil-lab-backend/src/api/handlers/user_handler.rs

use crate::api::dto::user_dto::{UserListResponse, UserResponse};
use crate::api::AppState;
use crate::domain::actor::Actor;
use crate::error::AppResult;
use crate::types::ApiResponse;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// 閲覧可能なユーザー一覧
pub async fn list_users_handler(
    State(app_state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<ApiResponse<UserListResponse>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let users = app_state.user_service.list_visible_users(&scope).await?;

    Ok(Json(ApiResponse::success(UserListResponse::new(users))))
}

pub async fn get_user_handler(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let user = app_state
        .user_service
        .get_visible_user(&scope, user_id)
        .await?;

    Ok(Json(ApiResponse::success(user.into())))
}

pub fn user_router_with_state(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}", get(get_user_handler))
        .with_state(app_state)
}
