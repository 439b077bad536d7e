// soil-lab-backend/src/api/dto/organization_dto.rs

use crate::domain::organization_model::{AccessLevel, Organization, OrganizationType};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// --- リクエストDTO ---

/// 組織作成リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Organization name must be between 1 and 255 characters"
        ),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    pub organization_type: OrganizationType,

    pub parent_organization_id: Option<i32>,

    /// 省略時は isolated
    pub access_level: Option<AccessLevel>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Organization name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

// --- レスポンスDTO ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: i32,
    pub name: String,
    pub organization_type: OrganizationType,
    pub parent_organization_id: Option<i32>,
    pub access_level: AccessLevel,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            organization_type: organization.organization_type,
            parent_organization_id: organization.parent_organization_id,
            access_level: organization.access_level,
        }
    }
}

/// アクセス可能な組織の一覧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibleOrganizationsResponse {
    pub home_organization_id: Option<i32>,
    pub organization_ids: Vec<i32>,
    pub organizations: Vec<OrganizationResponse>,
}
