// src/repository/user_repository.rs

use crate::db;
use crate::domain::user_model::{self, Entity as UserEntity};
use crate::error::AppResult;
use crate::repository::directory::UserStore;
use async_trait::async_trait;
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, Order, QueryOrder};

#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DbConn,
    schema: Option<String>,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db, schema: None }
    }

    pub fn with_schema(db: DbConn, schema: String) -> Self {
        Self {
            db,
            schema: Some(schema),
        }
    }

    // スキーマを設定するヘルパーメソッド
    async fn prepare_connection(&self) -> Result<(), DbErr> {
        if let Some(schema) = &self.schema {
            db::set_schema(&self.db, schema).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// 全ユーザーを取得（ID昇順）
    async fn list_users(&self) -> AppResult<Vec<user_model::Model>> {
        self.prepare_connection().await?;
        let users = UserEntity::find()
            .order_by(user_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    /// ユーザーをIDで検索
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user_model::Model>> {
        self.prepare_connection().await?;
        Ok(UserEntity::find_by_id(id).one(&self.db).await?)
    }
}
