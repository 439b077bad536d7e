// soil-lab-backend/src/repository/directory.rs
//
// アクセス制御コアとHTTP層が消費する外部コラボレーターのインターフェース

use crate::domain::organization_model::{AccessLevel, Organization, OrganizationType};
use crate::domain::{equipment_model, test_record_model, user_model};
use crate::error::{AppResult, DirectoryError};
use async_trait::async_trait;

/// 組織ディレクトリ（読み取り専用）
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// 見つからない場合は `Ok(None)`
    async fn get_by_id(&self, id: i32) -> Result<Option<Organization>, DirectoryError>;

    /// `parent_organization_id == headquarters_id` の組織一覧
    async fn list_affiliates(
        &self,
        headquarters_id: i32,
    ) -> Result<Vec<Organization>, DirectoryError>;
}

/// 新規組織の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub organization_type: OrganizationType,
    pub parent_organization_id: Option<i32>,
    pub access_level: AccessLevel,
}

/// 管理操作用の書き込み可能な組織ストア
#[async_trait]
pub trait OrganizationStore: OrganizationDirectory {
    async fn create(&self, organization: NewOrganization) -> AppResult<Organization>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> AppResult<Vec<user_model::Model>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<user_model::Model>>;
}

/// 組織単位で保存されるラボ記録
#[async_trait]
pub trait LabRecordStore: Send + Sync {
    async fn list_test_records(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<test_record_model::Model>>;

    async fn list_equipment(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<equipment_model::Model>>;
}
