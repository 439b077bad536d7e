// soil-lab-backend/src/repository/lab_record_repository.rs

use crate::db;
use crate::domain::equipment_model::{self, Entity as EquipmentEntity};
use crate::domain::test_record_model::{self, Entity as TestRecordEntity};
use crate::error::AppResult;
use crate::repository::directory::LabRecordStore;
use async_trait::async_trait;
use sea_orm::entity::*;
use sea_orm::{DbConn, DbErr, Order, QueryFilter, QueryOrder};

#[derive(Debug, Clone)]
pub struct LabRecordRepository {
    db: DbConn,
    schema: Option<String>,
}

impl LabRecordRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db, schema: None }
    }

    pub fn with_schema(db: DbConn, schema: String) -> Self {
        Self {
            db,
            schema: Some(schema),
        }
    }

    async fn prepare_connection(&self) -> Result<(), DbErr> {
        if let Some(schema) = &self.schema {
            db::set_schema(&self.db, schema).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl LabRecordStore for LabRecordRepository {
    /// 指定組織群の試験記録を新しい順に取得
    async fn list_test_records(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<test_record_model::Model>> {
        if organization_ids.is_empty() {
            return Ok(vec![]);
        }
        self.prepare_connection().await?;
        let records = TestRecordEntity::find()
            .filter(test_record_model::Column::OrganizationId.is_in(organization_ids.to_vec()))
            .order_by(test_record_model::Column::CreatedAt, Order::Desc)
            .order_by(test_record_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await?;
        Ok(records)
    }

    async fn list_equipment(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<equipment_model::Model>> {
        if organization_ids.is_empty() {
            return Ok(vec![]);
        }
        self.prepare_connection().await?;
        let equipment = EquipmentEntity::find()
            .filter(equipment_model::Column::OrganizationId.is_in(organization_ids.to_vec()))
            .order_by(equipment_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await?;
        Ok(equipment)
    }
}
