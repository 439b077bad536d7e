// src/domain/user_model.rs

use super::role_model::Role;
use crate::error::AccessError;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// 外部IDプロバイダーのuid
    #[sea_orm(unique)]
    pub uid: String,

    #[sea_orm(unique)]
    pub email: String,

    pub display_name: String,

    pub role: String,

    #[sea_orm(nullable)]
    pub organization_id: Option<i32>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
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

/// ロールが検証済みのユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub organization_id: Option<i32>,
    pub is_active: bool,
}

impl TryFrom<Model> for User {
    type Error = AccessError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = Role::parse(&model.role)?;
        Ok(Self {
            id: model.id,
            uid: model.uid,
            email: model.email,
            display_name: model.display_name,
            role,
            organization_id: model.organization_id,
            is_active: model.is_active,
        })
    }
}
