// soil-lab-backend/src/api/handlers/organization_handler.rs

use crate::api::dto::organization_dto::*;
use crate::api::AppState;
use crate::domain::actor::Actor;
use crate::error::AppResult;
use crate::types::ApiResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// 組織作成（ADMIN以上）
pub async fn create_organization_handler(
    State(app_state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateOrganizationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrganizationResponse>>)> {
    let scope = app_state.access_resolver.scope(&actor);
    let organization = app_state
        .organization_service
        .create_organization(&scope, payload)
        .await?;

    Ok(ApiResponse::created(organization.into()))
}

/// 組織詳細取得
pub async fn get_organization_handler(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(organization_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrganizationResponse>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let organization = app_state
        .organization_service
        .get_organization(&scope, organization_id)
        .await?;

    Ok(Json(ApiResponse::success(organization.into())))
}

/// 主体がアクセスできる組織の一覧
pub async fn get_accessible_organizations_handler(
    State(app_state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<ApiResponse<AccessibleOrganizationsResponse>>> {
    let scope = app_state.access_resolver.scope(&actor);
    let organization_ids = scope.accessible_organization_ids().await?;
    let organizations = app_state
        .organization_service
        .accessible_organizations(&scope)
        .await?;

    Ok(Json(ApiResponse::success(AccessibleOrganizationsResponse {
        home_organization_id: actor.organization_id,
        organization_ids,
        organizations: organizations.into_iter().map(Into::into).collect(),
    })))
}

pub fn organization_router_with_state(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/organizations",
            axum::routing::post(create_organization_handler),
        )
        .route(
            "/organizations/accessible",
            get(get_accessible_organizations_handler),
        )
        .route("/organizations/{id}", get(get_organization_handler))
        .with_state(app_state)
}
