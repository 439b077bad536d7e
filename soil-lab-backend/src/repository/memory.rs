// soil-lab-backend/src/repository/memory.rs
//
// DBを使わずにコラボレーターを差し替えるためのインメモリ実装

use crate::domain::organization_model::{Organization, OrganizationType};
use crate::domain::{equipment_model, test_record_model, user_model};
use crate::error::{AppResult, DirectoryError};
use crate::repository::directory::{
    LabRecordStore, NewOrganization, OrganizationDirectory, OrganizationStore, UserStore,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    organizations: RwLock<Vec<Organization>>,
    users: RwLock<Vec<user_model::Model>>,
    test_records: RwLock<Vec<test_record_model::Model>>,
    equipment: RwLock<Vec<equipment_model::Model>>,
    /// この組織IDへのディレクトリ読み取りは `Unavailable` を返す
    failing_ids: HashSet<i32>,
    lookups: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organizations.get_mut().push(organization);
        self
    }

    pub fn with_user(mut self, user: user_model::Model) -> Self {
        self.users.get_mut().push(user);
        self
    }

    pub fn with_test_record(mut self, record: test_record_model::Model) -> Self {
        self.test_records.get_mut().push(record);
        self
    }

    pub fn with_equipment(mut self, equipment: equipment_model::Model) -> Self {
        self.equipment.get_mut().push(equipment);
        self
    }

    pub fn with_failing_lookup(mut self, organization_id: i32) -> Self {
        self.failing_ids.insert(organization_id);
        self
    }

    /// これまでのディレクトリ読み取り回数
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn replace_organization(&self, organization: Organization) {
        let mut organizations = self.organizations.write().await;
        organizations.retain(|o| o.id != organization.id);
        organizations.push(organization);
    }

    fn record_lookup(&self, organization_id: i32) -> Result<(), DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_ids.contains(&organization_id) {
            return Err(DirectoryError::Unavailable(format!(
                "simulated failure for organization {}",
                organization_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl OrganizationDirectory for InMemoryStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<Organization>, DirectoryError> {
        self.record_lookup(id)?;
        let organizations = self.organizations.read().await;
        Ok(organizations.iter().find(|o| o.id == id).cloned())
    }

    async fn list_affiliates(
        &self,
        headquarters_id: i32,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.record_lookup(headquarters_id)?;
        let organizations = self.organizations.read().await;
        Ok(organizations
            .iter()
            .filter(|o| o.parent_organization_id == Some(headquarters_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrganizationStore for InMemoryStore {
    async fn create(&self, organization: NewOrganization) -> AppResult<Organization> {
        let mut organizations = self.organizations.write().await;
        let id = organizations.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let parent_organization_id = match organization.organization_type {
            OrganizationType::Affiliate => organization.parent_organization_id,
            _ => None,
        };
        let created = Organization {
            id,
            name: organization.name,
            organization_type: organization.organization_type,
            parent_organization_id,
            access_level: organization.access_level,
        };
        organizations.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn list_users(&self) -> AppResult<Vec<user_model::Model>> {
        let mut users = self.users.read().await.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<user_model::Model>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl LabRecordStore for InMemoryStore {
    async fn list_test_records(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<test_record_model::Model>> {
        let mut records: Vec<_> = self
            .test_records
            .read()
            .await
            .iter()
            .filter(|r| organization_ids.contains(&r.organization_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn list_equipment(
        &self,
        organization_ids: &[i32],
    ) -> AppResult<Vec<equipment_model::Model>> {
        let mut equipment: Vec<_> = self
            .equipment
            .read()
            .await
            .iter()
            .filter(|e| organization_ids.contains(&e.organization_id))
            .cloned()
            .collect();
        equipment.sort_by_key(|e| e.id);
        Ok(equipment)
    }
}
