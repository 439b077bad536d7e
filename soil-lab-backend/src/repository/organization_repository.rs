// soil-lab-backend/src/repository/organization_repository.rs

use crate::db;
use crate::domain::organization_model::{
    self, ActiveModel as OrganizationActiveModel, Entity as OrganizationEntity, Organization,
    OrganizationType,
};
use crate::error::{AppError, AppResult, DirectoryError};
use crate::repository::directory::{NewOrganization, OrganizationDirectory, OrganizationStore};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, Order, QueryFilter, QueryOrder, Set};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DbConn,
    schema: Option<String>,
    lookup_timeout: Duration,
}

impl OrganizationRepository {
    pub fn new(db: DbConn, lookup_timeout: Duration) -> Self {
        Self {
            db,
            schema: None,
            lookup_timeout,
        }
    }

    pub fn with_schema(db: DbConn, schema: String, lookup_timeout: Duration) -> Self {
        Self {
            db,
            schema: Some(schema),
            lookup_timeout,
        }
    }

    // スキーマを設定するヘルパーメソッド
    async fn prepare_connection(&self) -> Result<(), DbErr> {
        if let Some(schema) = &self.schema {
            db::set_schema(&self.db, schema).await?;
        }
        Ok(())
    }

    /// ディレクトリ読み取りにタイムアウトを適用
    async fn bounded<T, F>(&self, lookup: F) -> Result<T, DirectoryError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(DirectoryError::Unavailable(e.to_string())),
            Err(_) => Err(DirectoryError::Timeout(
                self.lookup_timeout.as_millis() as u64
            )),
        }
    }

    async fn find_model(&self, id: i32) -> Result<Option<organization_model::Model>, DbErr> {
        self.prepare_connection().await?;
        OrganizationEntity::find_by_id(id).one(&self.db).await
    }

    async fn find_affiliate_models(
        &self,
        headquarters_id: i32,
    ) -> Result<Vec<organization_model::Model>, DbErr> {
        self.prepare_connection().await?;
        OrganizationEntity::find()
            .filter(organization_model::Column::ParentOrganizationId.eq(headquarters_id))
            .order_by(organization_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await
    }
}

#[async_trait]
impl OrganizationDirectory for OrganizationRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Organization>, DirectoryError> {
        let model = self.bounded(self.find_model(id)).await?;
        model
            .map(|m| m.to_organization().map_err(DirectoryError::Unavailable))
            .transpose()
    }

    async fn list_affiliates(
        &self,
        headquarters_id: i32,
    ) -> Result<Vec<Organization>, DirectoryError> {
        let models = self
            .bounded(self.find_affiliate_models(headquarters_id))
            .await?;

        // 読めない行は除外する（アクセス範囲が狭まる方向にのみ作用する）
        Ok(models
            .iter()
            .filter_map(|m| match m.to_organization() {
                Ok(org) => Some(org),
                Err(e) => {
                    warn!(organization_id = m.id, error = %e, "Skipping unreadable affiliate");
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl OrganizationStore for OrganizationRepository {
    async fn create(&self, organization: NewOrganization) -> AppResult<Organization> {
        self.prepare_connection().await?;

        let now = Utc::now();
        let parent_organization_id = match organization.organization_type {
            OrganizationType::Affiliate => organization.parent_organization_id,
            _ => None,
        };
        let model = OrganizationActiveModel {
            name: Set(organization.name),
            organization_type: Set(organization.organization_type.as_str().to_string()),
            parent_organization_id: Set(parent_organization_id),
            access_level: Set(Some(organization.access_level.as_str().to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        model.to_organization().map_err(AppError::InternalServerError)
    }
}
