// soil-lab-backend/src/service/organization_service.rs

use crate::api::dto::organization_dto::CreateOrganizationRequest;
use crate::domain::organization_model::{Organization, OrganizationType};
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::directory::{NewOrganization, OrganizationStore};
use crate::service::hierarchical_access_service::AccessScope;
use std::sync::Arc;
use validator::Validate;

pub struct OrganizationService {
    store: Arc<dyn OrganizationStore>,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn OrganizationStore>) -> Self {
        Self { store }
    }

    /// 組織作成（ADMIN以上）
    pub async fn create_organization(
        &self,
        scope: &AccessScope<'_>,
        payload: CreateOrganizationRequest,
    ) -> AppResult<Organization> {
        payload.validate()?;

        let actor = scope.actor();
        if !actor.role.is_admin_or_above() {
            log_with_context!(
                tracing::Level::WARN,
                "Organization creation denied",
                "actor_uid" => &actor.uid,
                "role" => actor.role.as_str()
            );
            return Err(AppError::access_denied());
        }

        let organization_type = payload.organization_type;
        let parent_organization_id = match organization_type {
            OrganizationType::Independent | OrganizationType::Headquarters => {
                if payload.parent_organization_id.is_some() {
                    return Err(AppError::BadRequest(format!(
                        "Organizations of type {} cannot have a parent",
                        organization_type
                    )));
                }
                None
            }
            OrganizationType::Affiliate => {
                let parent_id = payload.parent_organization_id.ok_or_else(|| {
                    AppError::BadRequest("An affiliate requires a parent organization".to_string())
                })?;
                // 範囲外の親は存在有無を含めて明かさない
                if !scope.can_access_organization(parent_id).await? {
                    return Err(AppError::access_denied());
                }
                let parent = self.store.get_by_id(parent_id).await?.ok_or_else(|| {
                    AppError::BadRequest("Parent organization does not exist".to_string())
                })?;
                if !parent.is_headquarters() {
                    return Err(AppError::BadRequest(
                        "The parent of an affiliate must be a headquarters".to_string(),
                    ));
                }
                Some(parent_id)
            }
        };

        let organization = self
            .store
            .create(NewOrganization {
                name: payload.name.trim().to_string(),
                organization_type,
                parent_organization_id,
                access_level: payload.access_level.unwrap_or_default(),
            })
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Organization created",
            "organization_id" => organization.id,
            "organization_type" => organization.organization_type.as_str(),
            "parent_organization_id" => organization.parent_organization_id,
            "created_by" => &actor.uid
        );

        Ok(organization)
    }

    /// 範囲外の組織と存在しない組織は同じ拒否になる
    pub async fn get_organization(
        &self,
        scope: &AccessScope<'_>,
        organization_id: i32,
    ) -> AppResult<Organization> {
        if !scope.can_access_organization(organization_id).await? {
            return Err(AppError::access_denied());
        }

        self.store
            .get_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))
    }

    /// スコープ内の組織（ID昇順）。ディレクトリに存在しないIDは省く
    pub async fn accessible_organizations(
        &self,
        scope: &AccessScope<'_>,
    ) -> AppResult<Vec<Organization>> {
        let mut organizations = Vec::new();
        for id in scope.accessible_organization_ids().await? {
            if let Some(organization) = self.store.get_by_id(id).await? {
                organizations.push(organization);
            }
        }
        Ok(organizations)
    }
}
