// soil-lab-backend/src/service/lab_record_service.rs

use crate::domain::{equipment_model, test_record_model};
use crate::error::{AppError, AppResult};
use crate::repository::directory::LabRecordStore;
use crate::service::hierarchical_access_service::AccessScope;
use std::sync::Arc;

/// 試験記録・機材の参照。いずれも組織単位で認可する
pub struct LabRecordService {
    records: Arc<dyn LabRecordStore>,
}

impl LabRecordService {
    pub fn new(records: Arc<dyn LabRecordStore>) -> Self {
        Self { records }
    }

    /// スコープ内すべての試験記録
    pub async fn list_test_records(
        &self,
        scope: &AccessScope<'_>,
    ) -> AppResult<Vec<test_record_model::Model>> {
        let organization_ids = scope.accessible_organization_ids().await?;
        let records = self.records.list_test_records(&organization_ids).await?;
        // ストアの絞り込みに依存せず、返す直前にもう一度判定する
        Ok(scope.filter_scoped(records).await?)
    }

    pub async fn list_organization_test_records(
        &self,
        scope: &AccessScope<'_>,
        organization_id: i32,
    ) -> AppResult<Vec<test_record_model::Model>> {
        self.authorize(scope, organization_id).await?;
        let records = self.records.list_test_records(&[organization_id]).await?;
        Ok(scope.filter_scoped(records).await?)
    }

    pub async fn list_organization_equipment(
        &self,
        scope: &AccessScope<'_>,
        organization_id: i32,
    ) -> AppResult<Vec<equipment_model::Model>> {
        self.authorize(scope, organization_id).await?;
        let equipment = self.records.list_equipment(&[organization_id]).await?;
        Ok(scope.filter_scoped(equipment).await?)
    }

    async fn authorize(&self, scope: &AccessScope<'_>, organization_id: i32) -> AppResult<()> {
        if !scope.can_access_organization(organization_id).await? {
            tracing::debug!(
                actor_uid = %scope.actor().uid,
                organization_id,
                "Organization-scoped records denied"
            );
            return Err(AppError::access_denied());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::Actor;
    use crate::domain::organization_model::Organization;
    use crate::domain::role_model::Role;
    use crate::repository::memory::InMemoryStore;
    use crate::service::hierarchical_access_service::HierarchicalAccessResolver;
    use crate::service::organization_access_service::OrganizationAccessResolver;
    use chrono::{Duration, Utc};

    fn record(id: i32, organization_id: i32, minutes_ago: i64) -> test_record_model::Model {
        test_record_model::Model {
            id,
            organization_id,
            test_type: "density_in_situ".to_string(),
            sample_code: format!("AM-{:03}", id),
            registered_by: "uid-tech".to_string(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn setup() -> (LabRecordService, HierarchicalAccessResolver) {
        let store = Arc::new(
            InMemoryStore::new()
                .with_organization(Organization::headquarters(1, "Matriz"))
                .with_organization(Organization::affiliate(2, "Filial", 1))
                .with_organization(Organization::independent(3, "Lab"))
                .with_test_record(record(1, 1, 30))
                .with_test_record(record(2, 2, 10))
                .with_test_record(record(3, 3, 5))
                .with_equipment(equipment_model::Model {
                    id: 1,
                    organization_id: 2,
                    name: "Frasco de areia".to_string(),
                    kind: "sand_cone".to_string(),
                    calibration_due: None,
                    created_at: Utc::now(),
                }),
        );
        let resolver =
            HierarchicalAccessResolver::new(OrganizationAccessResolver::new(store.clone()));
        (LabRecordService::new(store), resolver)
    }

    #[tokio::test]
    async fn test_headquarters_lists_records_of_affiliates() {
        let (service, resolver) = setup();
        let actor = Actor::new("v", "v@lab.example", Role::Viewer, Some(1));
        let records = service
            .list_test_records(&resolver.scope(&actor))
            .await
            .unwrap();
        // 新しい順
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_affiliate_cannot_read_headquarters_records() {
        let (service, resolver) = setup();
        let actor = Actor::new("t", "t@lab.example", Role::Technician, Some(2));
        let scope = resolver.scope(&actor);

        let err = service
            .list_organization_test_records(&scope, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let equipment = service.list_organization_equipment(&scope, 2).await.unwrap();
        assert_eq!(equipment.len(), 1);
    }

    #[tokio::test]
    async fn test_actor_without_organization_sees_nothing() {
        let (service, resolver) = setup();
        let actor = Actor::new("x", "x@lab.example", Role::Developer, None);
        let records = service
            .list_test_records(&resolver.scope(&actor))
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
