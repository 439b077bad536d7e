// soil-lab-backend/src/service/organization_access_service.rs
//
// 組織階層からアクセス可能な組織IDの集合を求める

use crate::domain::organization_model::{AccessLevel, Organization, OrganizationType};
use crate::error::{AccessError, DirectoryError};
use crate::log_with_context;
use crate::repository::directory::OrganizationDirectory;
use std::collections::HashSet;
use std::sync::Arc;

/// ディレクトリ読み取りが失敗した理由
#[derive(Debug)]
enum LookupFailure {
    Directory(DirectoryError),
    HomeNotFound,
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupFailure::Directory(e) => write!(f, "{}", e),
            LookupFailure::HomeNotFound => write!(f, "home organization not found"),
        }
    }
}

impl From<DirectoryError> for LookupFailure {
    fn from(err: DirectoryError) -> Self {
        LookupFailure::Directory(err)
    }
}

/// 組織アクセス解決
///
/// 階層は 本部 → 関連組織 の最大2階層。展開は1段上と1段下に限定し、
/// 再帰的な走査は行わない。ディレクトリの読み取りに失敗した場合は
/// `{home}` に縮退する（strictモードでは `OrganizationLookupFailed`）。
#[derive(Clone)]
pub struct OrganizationAccessResolver {
    directory: Arc<dyn OrganizationDirectory>,
    strict: bool,
}

impl OrganizationAccessResolver {
    pub fn new(directory: Arc<dyn OrganizationDirectory>) -> Self {
        Self {
            directory,
            strict: false,
        }
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// `home_org_id` から到達できる組織IDの集合（必ず `home_org_id` を含む）
    pub async fn accessible_organizations(
        &self,
        home_org_id: i32,
    ) -> Result<HashSet<i32>, AccessError> {
        match self.expand(home_org_id).await {
            Ok(accessible) => {
                log_with_context!(
                    tracing::Level::DEBUG,
                    "Accessible organizations resolved",
                    "home_organization_id" => home_org_id,
                    "accessible_count" => accessible.len()
                );
                Ok(accessible)
            }
            Err(failure) if self.strict => Err(AccessError::OrganizationLookupFailed {
                organization_id: home_org_id,
                reason: failure.to_string(),
            }),
            Err(failure) => {
                log_with_context!(
                    tracing::Level::WARN,
                    "Organization lookup failed, falling back to minimal access",
                    "home_organization_id" => home_org_id,
                    "reason" => failure.to_string()
                );
                Ok(HashSet::from([home_org_id]))
            }
        }
    }

    /// `target_org_id` が `home_org_id` のアクセス範囲に含まれるか
    pub async fn can_access_organization(
        &self,
        home_org_id: i32,
        target_org_id: i32,
    ) -> Result<bool, AccessError> {
        let accessible = self.accessible_organizations(home_org_id).await?;
        Ok(accessible.contains(&target_org_id))
    }

    async fn expand(&self, home_org_id: i32) -> Result<HashSet<i32>, LookupFailure> {
        let mut accessible = HashSet::from([home_org_id]);

        let home = match self.directory.get_by_id(home_org_id).await? {
            Some(home) => home,
            None if self.strict => return Err(LookupFailure::HomeNotFound),
            None => return Ok(accessible),
        };

        match home.organization_type {
            // 独立組織同士の分離は絶対
            OrganizationType::Independent => return Ok(accessible),
            OrganizationType::Headquarters => {
                let affiliates = self.directory.list_affiliates(home_org_id).await?;
                accessible.extend(affiliate_ids(&affiliates));
            }
            OrganizationType::Affiliate => {
                accessible.extend(self.expand_upwards(&home).await?);
            }
        }

        Ok(accessible)
    }

    /// 関連組織から親と兄弟への展開。full_hierarchy 以外は何も追加しない
    async fn expand_upwards(&self, affiliate: &Organization) -> Result<Vec<i32>, LookupFailure> {
        let Some(parent_id) = affiliate.parent_organization_id else {
            tracing::warn!(
                organization_id = affiliate.id,
                "Affiliate has no parent organization"
            );
            return Ok(vec![]);
        };

        match affiliate.access_level {
            // 上方向の展開は full_hierarchy のときだけ
            AccessLevel::Isolated | AccessLevel::ParentAccess => Ok(vec![]),
            AccessLevel::FullHierarchy => {
                let (parent, siblings) = tokio::join!(
                    self.directory.get_by_id(parent_id),
                    self.directory.list_affiliates(parent_id)
                );
                let (parent, siblings) = (parent?, siblings?);
                Ok(match valid_parent(affiliate, parent) {
                    Some(parent) => {
                        let mut ids = vec![parent.id];
                        ids.extend(affiliate_ids(&siblings));
                        ids
                    }
                    None => vec![],
                })
            }
        }
    }
}

/// 親が存在し本部であるときだけ上方向の展開を許す
fn valid_parent(affiliate: &Organization, parent: Option<Organization>) -> Option<Organization> {
    match parent {
        Some(parent) if parent.is_headquarters() => Some(parent),
        Some(parent) => {
            tracing::warn!(
                organization_id = affiliate.id,
                parent_organization_id = parent.id,
                parent_type = %parent.organization_type,
                "Affiliate parent is not a headquarters, skipping expansion"
            );
            None
        }
        None => {
            tracing::warn!(
                organization_id = affiliate.id,
                parent_organization_id = ?affiliate.parent_organization_id,
                "Affiliate parent not found, skipping expansion"
            );
            None
        }
    }
}

fn affiliate_ids(organizations: &[Organization]) -> impl Iterator<Item = i32> + '_ {
    organizations
        .iter()
        .filter(|o| o.is_affiliate())
        .map(|o| o.id)
}
