// src/main.rs
use migration::{Migrator, MigratorTrait};
use soil_lab_backend::api::{app_router, AppState};
use soil_lab_backend::config::AppConfig;
use soil_lab_backend::db;
use soil_lab_backend::repository::{
    lab_record_repository::LabRecordRepository, organization_repository::OrganizationRepository,
    user_repository::UserRepository,
};
use soil_lab_backend::utils::jwt::JwtManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soil_lab_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Soil Lab backend...");

    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        strict_access_mode = app_config.access.strict_mode,
        lookup_timeout_ms = app_config.access.lookup_timeout_ms,
        "Configuration loaded"
    );

    let db_pool = db::connect(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.run_migrations {
        tracing::info!("Running pending migrations");
        Migrator::up(&db_pool, None).await?;
    }

    let lookup_timeout = app_config.access.lookup_timeout();
    let (organizations, users, lab_records) = match &app_config.db_schema {
        Some(schema) => (
            OrganizationRepository::with_schema(db_pool.clone(), schema.clone(), lookup_timeout),
            UserRepository::with_schema(db_pool.clone(), schema.clone()),
            LabRecordRepository::with_schema(db_pool.clone(), schema.clone()),
        ),
        None => (
            OrganizationRepository::new(db_pool.clone(), lookup_timeout),
            UserRepository::new(db_pool.clone()),
            LabRecordRepository::new(db_pool.clone()),
        ),
    };

    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt.clone())?);
    let app_state = AppState::new(
        &app_config,
        jwt_manager,
        Arc::new(organizations),
        Arc::new(users),
        Arc::new(lab_records),
    );
    let router = app_router(app_state);

    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
