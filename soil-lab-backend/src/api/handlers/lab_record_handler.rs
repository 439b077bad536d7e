// soil-lab-backend/src/api/handlers/lab_record_handler.rs

use crate::api::dto::lab_record_dto::{EquipmentResponse, TestRecordResponse};
use crate::api::AppState;
use crate::domain::actor::Actor;
use crate::error::AppResult;
use crate::types::ApiResponse;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// スコープ内すべての試験記録（新しい順）
pub async fn list_test_records_handler(
    State(app_state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<ApiResponse<Vec<TestRecordResponse>>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let records = app_state.lab_record_service.list_test_records(&scope).await?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(Into::into).collect(),
    )))
}

pub async fn list_organization_test_records_handler(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(organization_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<TestRecordResponse>>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let records = app_state
        .lab_record_service
        .list_organization_test_records(&scope, organization_id)
        .await?;

    Ok(Json(ApiResponse::success(
        records.into_iter().map(Into::into).collect(),
    )))
}

pub async fn list_organization_equipment_handler(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(organization_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<EquipmentResponse>>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let equipment = app_state
        .lab_record_service
        .list_organization_equipment(&scope, organization_id)
        .await?;

    Ok(Json(ApiResponse::success(
        equipment.into_iter().map(Into::into).collect(),
    )))
}

pub fn lab_record_router_with_state(app_state: AppState) -> Router {
    Router::new()
        .route("/test-records", get(list_test_records_handler))
        .route(
            "/organizations/{id}/test-records",
            get(list_organization_test_records_handler),
        )
        .route(
            "/organizations/{id}/equipment",
            get(list_organization_equipment_handler),
        )
        .with_state(app_state)
}
