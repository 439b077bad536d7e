// soil-lab-backend/src/domain/test_record_model.rs

use super::actor::OrganizationScoped;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 土質試験記録（計算式は持たず、登録情報のみ）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub test_type: String,
    pub sample_code: String,
    pub registered_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization_model::Entity",
        from = "Column::OrganizationId",
        to = "super::organization_model::Column::Id"
    )]
    Organization,
}

impl Related<super::organization_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl OrganizationScoped for Model {
    fn organization_id(&self) -> Option<i32> {
        Some(self.organization_id)
    }
}

/// NBR試験の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    DensityInSitu,
    RealDensity,
    MaxMinDensity,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::DensityInSitu => "density_in_situ",
            TestType::RealDensity => "real_density",
            TestType::MaxMinDensity => "max_min_density",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "density_in_situ" => Some(TestType::DensityInSitu),
            "real_density" => Some(TestType::RealDensity),
            "max_min_density" => Some(TestType::MaxMinDensity),
            _ => None,
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
