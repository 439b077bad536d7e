// soil-lab-backend/src/service/hierarchical_access_service.rs
//
// ロール階層 × 組織階層 の二重アクセス制御の単一入口

use crate::domain::actor::{Actor, OrganizationScoped};
use crate::domain::user_model::User;
use crate::error::AccessError;
use crate::log_with_context;
use crate::service::organization_access_service::OrganizationAccessResolver;
use std::collections::HashSet;
use tokio::sync::OnceCell;

/// 拒否理由。ログにのみ出力し、クライアントには返さない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    MissingOrganization,
    InsufficientRoleRank,
    OrganizationOutOfScope,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::MissingOrganization => "missing_organization",
            DenialReason::InsufficientRoleRank => "insufficient_role_rank",
            DenialReason::OrganizationOutOfScope => "organization_out_of_scope",
        }
    }
}

/// 1回の判定結果（永続化しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: Option<DenialReason>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

#[derive(Clone)]
pub struct HierarchicalAccessResolver {
    organizations: OrganizationAccessResolver,
}

impl HierarchicalAccessResolver {
    pub fn new(organizations: OrganizationAccessResolver) -> Self {
        Self { organizations }
    }

    pub fn organizations(&self) -> &OrganizationAccessResolver {
        &self.organizations
    }

    /// 1リクエスト分の判定スコープを作る
    pub fn scope<'a>(&'a self, actor: &'a Actor) -> AccessScope<'a> {
        AccessScope {
            resolver: &self.organizations,
            actor,
            accessible: OnceCell::new(),
        }
    }

    pub async fn can_access_user(&self, actor: &Actor, target: &User) -> Result<bool, AccessError> {
        self.scope(actor).can_access_user(target).await
    }

    pub async fn filter_users(
        &self,
        actor: &Actor,
        candidates: Vec<User>,
    ) -> Result<Vec<User>, AccessError> {
        self.scope(actor).filter_users(candidates).await
    }

    /// 組織の可視性はロールに依存しない
    pub async fn can_access_organization(
        &self,
        actor: &Actor,
        target_org_id: i32,
    ) -> Result<bool, AccessError> {
        self.scope(actor).can_access_organization(target_org_id).await
    }
}

/// リクエスト単位の判定コンテキスト
///
/// アクセス可能組織の集合は最初に必要になった時点で一度だけ計算し、
/// スコープが破棄されるまで使い回す。リクエストをまたいでは共有しない。
pub struct AccessScope<'a> {
    resolver: &'a OrganizationAccessResolver,
    actor: &'a Actor,
    accessible: OnceCell<HashSet<i32>>,
}

impl<'a> AccessScope<'a> {
    pub fn actor(&self) -> &Actor {
        self.actor
    }

    /// 所属組織がない主体のスコープは空
    pub async fn accessible_organizations(&self) -> Result<&HashSet<i32>, AccessError> {
        self.accessible
            .get_or_try_init(|| async {
                match self.actor.organization_id {
                    Some(home) => self.resolver.accessible_organizations(home).await,
                    None => Ok(HashSet::new()),
                }
            })
            .await
    }

    /// ID昇順のアクセス可能組織
    pub async fn accessible_organization_ids(&self) -> Result<Vec<i32>, AccessError> {
        let mut ids: Vec<i32> = self.accessible_organizations().await?.iter().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    pub async fn decide_user_access(&self, target: &User) -> Result<AccessDecision, AccessError> {
        let (Some(_), Some(target_org_id)) = (self.actor.organization_id, target.organization_id)
        else {
            return Ok(AccessDecision::deny(DenialReason::MissingOrganization));
        };

        if !self.actor.role.can_act_as_superior_of(target.role) {
            return Ok(AccessDecision::deny(DenialReason::InsufficientRoleRank));
        }

        if !self.accessible_organizations().await?.contains(&target_org_id) {
            return Ok(AccessDecision::deny(DenialReason::OrganizationOutOfScope));
        }

        Ok(AccessDecision::allow())
    }

    pub async fn can_access_user(&self, target: &User) -> Result<bool, AccessError> {
        let decision = self.decide_user_access(target).await?;
        if let Some(reason) = decision.reason {
            log_with_context!(
                tracing::Level::DEBUG,
                "User access denied",
                "actor_uid" => &self.actor.uid,
                "target_user_id" => target.id,
                "reason" => reason.as_str()
            );
        }
        Ok(decision.allowed)
    }

    /// 入力順を保ったまま、アクセス可能なユーザーだけを残す
    pub async fn filter_users(&self, candidates: Vec<User>) -> Result<Vec<User>, AccessError> {
        let total = candidates.len();
        let mut visible = Vec::with_capacity(total);
        for candidate in candidates {
            if self.decide_user_access(&candidate).await?.allowed {
                visible.push(candidate);
            }
        }

        log_with_context!(
            tracing::Level::DEBUG,
            "Users filtered",
            "actor_uid" => &self.actor.uid,
            "candidates" => total,
            "visible" => visible.len()
        );
        Ok(visible)
    }

    pub async fn can_access_organization(&self, target_org_id: i32) -> Result<bool, AccessError> {
        if self.actor.organization_id.is_none() {
            return Ok(false);
        }
        Ok(self.accessible_organizations().await?.contains(&target_org_id))
    }

    /// 組織に属するリソースをスコープで絞り込む（ロールは判定に使わない）
    pub async fn filter_scoped<T: OrganizationScoped>(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, AccessError> {
        let accessible = self.accessible_organizations().await?;
        Ok(items
            .into_iter()
            .filter(|item| {
                item.organization_id()
                    .is_some_and(|org_id| accessible.contains(&org_id))
            })
            .collect())
    }
}
