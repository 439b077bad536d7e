// soil-lab-backend/src/domain/actor.rs

use super::role_model::Role;
use super::user_model::User;
use serde::{Deserialize, Serialize};

/// 認証境界で一度だけ構築される、検証済みのリクエスト主体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<i32>,
}

impl Actor {
    pub fn new(
        uid: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        organization_id: Option<i32>,
    ) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            role,
            organization_id,
        }
    }
}

/// 組織に所属するリソース（試験記録・機材など）
pub trait OrganizationScoped {
    fn organization_id(&self) -> Option<i32>;
}

impl OrganizationScoped for User {
    fn organization_id(&self) -> Option<i32> {
        self.organization_id
    }
}
