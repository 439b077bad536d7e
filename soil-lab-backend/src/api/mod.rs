// soil-lab-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::{cors_layer, jwt_auth_middleware, AuthMiddlewareConfig};
use crate::repository::directory::{LabRecordStore, OrganizationStore, UserStore};
use crate::service::{
    hierarchical_access_service::HierarchicalAccessResolver,
    lab_record_service::LabRecordService,
    organization_access_service::OrganizationAccessResolver,
    organization_service::OrganizationService, user_service::UserService,
};
use crate::utils::jwt::JwtManager;
use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub access_resolver: Arc<HierarchicalAccessResolver>,
    pub organization_service: Arc<OrganizationService>,
    pub user_service: Arc<UserService>,
    pub lab_record_service: Arc<LabRecordService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 組織ストアは判定用ディレクトリと作成用ストアを兼ねる
    pub fn new<O>(
        app_config: &AppConfig,
        jwt_manager: Arc<JwtManager>,
        organizations: Arc<O>,
        users: Arc<dyn UserStore>,
        lab_records: Arc<dyn LabRecordStore>,
    ) -> Self
    where
        O: OrganizationStore + 'static,
    {
        let organization_access = OrganizationAccessResolver::new(organizations.clone())
            .with_strict_mode(app_config.access.strict_mode);

        Self {
            access_resolver: Arc::new(HierarchicalAccessResolver::new(organization_access)),
            organization_service: Arc::new(OrganizationService::new(organizations)),
            user_service: Arc::new(UserService::new(users)),
            lab_record_service: Arc::new(LabRecordService::new(lab_records)),
            jwt_manager,
            config: Arc::new(app_config.clone()),
        }
    }
}

/// 全ルーターを統合し、認証・ロギング・CORSを適用する
pub fn app_router(app_state: AppState) -> Router {
    let auth_middleware_config = AuthMiddlewareConfig::new(app_state.jwt_manager.clone());
    let cors = cors_layer(&app_state.config.cors_allowed_origins);

    Router::new()
        .merge(handlers::system_handler::system_router_with_state(
            app_state.clone(),
        ))
        .merge(handlers::user_handler::user_router_with_state(
            app_state.clone(),
        ))
        .merge(handlers::organization_handler::organization_router_with_state(app_state.clone()))
        .merge(handlers::lab_record_handler::lab_record_router_with_state(
            app_state,
        ))
        // 下に書いたレイヤーほど外側で動く
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(axum_middleware::from_fn_with_state(
            auth_middleware_config,
            jwt_auth_middleware,
        ))
        .layer(axum_middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
