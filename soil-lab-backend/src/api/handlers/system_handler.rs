// soil-lab-backend/src/api/handlers/system_handler.rs

use crate::api::AppState;
use crate::types::ApiResponse;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub strict_access_mode: bool,
}

/// 認証不要
pub async fn health_handler(State(app_state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        environment: app_state.config.environment.clone(),
        strict_access_mode: app_state.access_resolver.organizations().is_strict(),
    }))
}

pub fn system_router_with_state(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_state)
}
