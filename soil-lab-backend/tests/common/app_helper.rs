// tests/common/app_helper.rs

use axum::Router;
use soil_lab_backend::api::{app_router, AppState};
use soil_lab_backend::config::AppConfig;
use soil_lab_backend::repository::memory::InMemoryStore;
use soil_lab_backend::utils::jwt::JwtManager;
use std::sync::Arc;

pub struct TestApp {
    pub router: Router,
    pub jwt_manager: Arc<JwtManager>,
    pub store: Arc<InMemoryStore>,
}

/// インメモリストアを差し込んだアプリ
pub fn setup_app(store: InMemoryStore) -> TestApp {
    setup_app_with_config(store, AppConfig::for_testing())
}

pub fn setup_app_with_config(store: InMemoryStore, app_config: AppConfig) -> TestApp {
    super::init_test_env();

    let store = Arc::new(store);
    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt.clone()).unwrap());
    let app_state = AppState::new(
        &app_config,
        jwt_manager.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );

    TestApp {
        router: app_router(app_state),
        jwt_manager,
        store,
    }
}
