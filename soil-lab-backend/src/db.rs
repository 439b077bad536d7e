// src/db.rs
use crate::config::AppConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    Database::connect(&config.database_url).await
}

// スキーマを指定して接続する
pub async fn create_db_pool_with_schema(config: &AppConfig, schema: &str) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    opt.max_connections(50)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8 * 60))
        .set_schema_search_path(schema.to_string());

    Database::connect(opt).await
}

// 既存の接続にスキーマを設定するヘルパー関数
pub async fn set_schema(conn: &DbPool, schema: &str) -> Result<(), DbErr> {
    let set_search_path = format!("SET search_path TO \"{}\";", schema);
    conn.execute(Statement::from_string(
        sea_orm::DatabaseBackend::Postgres,
        set_search_path,
    ))
    .await?;
    Ok(())
}

pub async fn schema_exists(conn: &DbPool, schema: &str) -> Result<bool, DbErr> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT EXISTS (SELECT 1 FROM information_schema.schemata WHERE schema_name = $1);",
            [schema.into()],
        ))
        .await?;

    match result {
        Some(row) => row.try_get("", "exists"),
        None => Ok(false),
    }
}

pub async fn create_schema(conn: &DbPool, schema: &str) -> Result<(), DbErr> {
    let create_schema = format!("CREATE SCHEMA IF NOT EXISTS \"{}\";", schema);
    conn.execute(Statement::from_string(
        sea_orm::DatabaseBackend::Postgres,
        create_schema,
    ))
    .await?;
    Ok(())
}

/// スキーマ付き接続を用意する（なければ作成）
pub async fn connect(config: &AppConfig) -> Result<DbPool, DbErr> {
    let Some(schema) = &config.db_schema else {
        return create_db_pool(config).await;
    };

    tracing::info!(schema = %schema, "Using database schema");
    let base_pool = create_db_pool(config).await?;
    if !schema_exists(&base_pool, schema).await? {
        tracing::info!(schema = %schema, "Schema does not exist, creating it");
        create_schema(&base_pool, schema).await?;
    }
    create_db_pool_with_schema(config, schema).await
}
