// soil-lab-backend/src/domain/organization_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// SeaORM Entity Model for organizations table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub organization_type: String,
    #[sea_orm(nullable)]
    pub parent_organization_id: Option<i32>,
    #[sea_orm(nullable)]
    pub access_level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_model::Entity")]
    Users,
    #[sea_orm(has_many = "super::test_record_model::Entity")]
    TestRecords,
    #[sea_orm(has_many = "super::equipment_model::Entity")]
    Equipment,
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::test_record_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestRecords.def()
    }
}

impl Related<super::equipment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// DB行からドメインの組織へ変換
    ///
    /// 組織種別が読めない行は lookup 失敗として扱う。
    /// アクセスレベルが読めない・未設定の場合は `isolated` とみなす。
    pub fn to_organization(&self) -> Result<Organization, String> {
        let organization_type = OrganizationType::parse(&self.organization_type)
            .ok_or_else(|| format!("Invalid organization_type: {}", self.organization_type))?;

        let access_level = match self.access_level.as_deref() {
            None => AccessLevel::default(),
            Some(label) => AccessLevel::parse(label).unwrap_or_else(|| {
                tracing::warn!(
                    organization_id = self.id,
                    access_level = %label,
                    "Unreadable access level, treating as isolated"
                );
                AccessLevel::Isolated
            }),
        };

        Ok(Organization {
            id: self.id,
            name: self.name.clone(),
            organization_type,
            parent_organization_id: self.parent_organization_id,
            access_level,
        })
    }
}

/// 組織種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Independent,
    Headquarters,
    Affiliate,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Independent => "independent",
            OrganizationType::Headquarters => "headquarters",
            OrganizationType::Affiliate => "affiliate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "independent" => Some(OrganizationType::Independent),
            "headquarters" => Some(OrganizationType::Headquarters),
            "affiliate" => Some(OrganizationType::Affiliate),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 階層の既定トラバーサルを変更するアクセスレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Isolated,
    ParentAccess,
    FullHierarchy,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Isolated => "isolated",
            AccessLevel::ParentAccess => "parent_access",
            AccessLevel::FullHierarchy => "full_hierarchy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "isolated" => Some(AccessLevel::Isolated),
            "parent_access" => Some(AccessLevel::ParentAccess),
            "full_hierarchy" => Some(AccessLevel::FullHierarchy),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ディレクトリが返す組織
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub organization_type: OrganizationType,
    pub parent_organization_id: Option<i32>,
    pub access_level: AccessLevel,
}

impl Organization {
    pub fn independent(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            organization_type: OrganizationType::Independent,
            parent_organization_id: None,
            access_level: AccessLevel::default(),
        }
    }

    pub fn headquarters(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            organization_type: OrganizationType::Headquarters,
            parent_organization_id: None,
            access_level: AccessLevel::default(),
        }
    }

    pub fn affiliate(id: i32, name: impl Into<String>, parent_id: i32) -> Self {
        Self {
            id,
            name: name.into(),
            organization_type: OrganizationType::Affiliate,
            parent_organization_id: Some(parent_id),
            access_level: AccessLevel::default(),
        }
    }

    pub fn with_access_level(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    pub fn is_headquarters(&self) -> bool {
        self.organization_type == OrganizationType::Headquarters
    }

    pub fn is_affiliate(&self) -> bool {
        self.organization_type == OrganizationType::Affiliate
    }

    pub fn is_independent(&self) -> bool {
        self.organization_type == OrganizationType::Independent
    }
}
