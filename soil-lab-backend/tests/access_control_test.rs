// tests/access_control_test.rs

mod common;

use common::test_data::*;
use soil_lab_backend::domain::actor::Actor;
use soil_lab_backend::domain::organization_model::Organization;
use soil_lab_backend::domain::role_model::Role;
use soil_lab_backend::domain::user_model::User;
use soil_lab_backend::repository::memory::InMemoryStore;
use soil_lab_backend::service::hierarchical_access_service::{
    DenialReason, HierarchicalAccessResolver,
};
use soil_lab_backend::service::organization_access_service::OrganizationAccessResolver;
use std::collections::HashSet;
use std::sync::Arc;

fn resolver(store: InMemoryStore) -> HierarchicalAccessResolver {
    common::init_test_env();
    HierarchicalAccessResolver::new(OrganizationAccessResolver::new(Arc::new(store)))
}

fn target(id: i32, role: Role, organization_id: Option<i32>) -> User {
    User::try_from(user(id, role.as_str(), organization_id)).unwrap()
}

#[tokio::test]
async fn test_every_organization_reaches_itself() {
    let r = resolver(hierarchy());
    for id in [HQ, AFFILIATE_NORTH, AFFILIATE_SOUTH, AFFILIATE_FULL, INDEPENDENT, 999] {
        let accessible = r.organizations().accessible_organizations(id).await.unwrap();
        assert!(accessible.contains(&id), "organization {} must reach itself", id);
    }
}

#[tokio::test]
async fn test_independent_scope_ignores_the_rest_of_the_directory() {
    let r = resolver(hierarchy());
    let accessible = r
        .organizations()
        .accessible_organizations(INDEPENDENT)
        .await
        .unwrap();
    assert_eq!(accessible, HashSet::from([INDEPENDENT]));
}

#[tokio::test]
async fn test_headquarters_and_affiliate_scopes() {
    let r = resolver(hierarchy());
    let orgs = r.organizations();

    assert_eq!(
        orgs.accessible_organizations(HQ).await.unwrap(),
        HashSet::from([HQ, AFFILIATE_NORTH, AFFILIATE_SOUTH, AFFILIATE_FULL])
    );
    assert!(!orgs
        .accessible_organizations(AFFILIATE_NORTH)
        .await
        .unwrap()
        .contains(&HQ));
    assert!(orgs
        .accessible_organizations(AFFILIATE_FULL)
        .await
        .unwrap()
        .contains(&HQ));
}

#[tokio::test]
async fn test_admin_in_headquarters_filters_affiliate_users() {
    // H(1, 本部) と A(2, isolated関連組織)
    let r = resolver(
        InMemoryStore::new()
            .with_organization(Organization::headquarters(1, "H"))
            .with_organization(Organization::affiliate(2, "A", 1)),
    );
    let actor = Actor::new("admin", "admin@lab.example", Role::Admin, Some(1));
    let u1 = target(1, Role::Viewer, Some(2));
    let u2 = target(2, Role::Admin, Some(2));
    let u3 = target(3, Role::Developer, Some(2));

    let visible = r
        .filter_users(&actor, vec![u1.clone(), u2.clone(), u3])
        .await
        .unwrap();
    assert_eq!(visible, vec![u1, u2]);
}

#[tokio::test]
async fn test_affiliate_viewer_cannot_access_headquarters() {
    let r = resolver(
        InMemoryStore::new()
            .with_organization(Organization::headquarters(1, "H"))
            .with_organization(Organization::affiliate(2, "A", 1)),
    );
    let actor = Actor::new("viewer", "viewer@lab.example", Role::Viewer, Some(2));

    assert!(!r.can_access_organization(&actor, 1).await.unwrap());
    assert!(r.can_access_organization(&actor, 2).await.unwrap());
}

#[tokio::test]
async fn test_role_and_organization_checks_are_both_required() {
    let r = resolver(hierarchy());

    // 組織は範囲内、ランク不足
    let viewer_in_hq = Actor::new("v", "v@lab.example", Role::Viewer, Some(HQ));
    let admin_in_affiliate = target(1, Role::Admin, Some(AFFILIATE_NORTH));
    let scope = r.scope(&viewer_in_hq);
    assert_eq!(
        scope.decide_user_access(&admin_in_affiliate).await.unwrap().reason,
        Some(DenialReason::InsufficientRoleRank)
    );

    // ランクは十分、組織が範囲外
    let developer_in_affiliate =
        Actor::new("d", "d@lab.example", Role::Developer, Some(AFFILIATE_NORTH));
    let viewer_in_hq_target = target(2, Role::Viewer, Some(HQ));
    let scope = r.scope(&developer_in_affiliate);
    assert_eq!(
        scope
            .decide_user_access(&viewer_in_hq_target)
            .await
            .unwrap()
            .reason,
        Some(DenialReason::OrganizationOutOfScope)
    );
}

#[tokio::test]
async fn test_user_access_matches_role_rank_and_scope_for_all_pairs() {
    let r = resolver(hierarchy());
    let organizations = [HQ, AFFILIATE_NORTH, AFFILIATE_FULL, INDEPENDENT];

    for actor_role in Role::ALL {
        for home in organizations {
            let actor = Actor::new("a", "a@lab.example", actor_role, Some(home));
            let scope = r.scope(&actor);
            let accessible = scope.accessible_organizations().await.unwrap().clone();

            for target_role in Role::ALL {
                for target_org in organizations {
                    let candidate = target(1, target_role, Some(target_org));
                    let expected = actor_role.rank() >= target_role.rank()
                        && accessible.contains(&target_org);
                    assert_eq!(
                        scope.can_access_user(&candidate).await.unwrap(),
                        expected,
                        "{} in {} -> {} in {}",
                        actor_role,
                        home,
                        target_role,
                        target_org
                    );
                }
            }
        }
    }
}

#[tokio::test]
async fn test_filter_preserves_order_and_never_fabricates() {
    let r = resolver(hierarchy());
    let actor = Actor::new("m", "m@lab.example", Role::Manager, Some(HQ));
    let candidates = vec![
        target(9, Role::Technician, Some(AFFILIATE_SOUTH)),
        target(3, Role::Developer, Some(HQ)),
        target(7, Role::Viewer, Some(INDEPENDENT)),
        target(1, Role::Manager, Some(HQ)),
        target(5, Role::Viewer, None),
        target(4, Role::Supervisor, Some(AFFILIATE_NORTH)),
    ];

    let visible = r.filter_users(&actor, candidates.clone()).await.unwrap();
    let visible_ids: Vec<i32> = visible.iter().map(|u| u.id).collect();
    assert_eq!(visible_ids, vec![9, 1, 4]);
    assert!(visible.iter().all(|u| candidates.contains(u)));
}

#[tokio::test]
async fn test_missing_organization_denies_regardless_of_rank() {
    let r = resolver(hierarchy());
    let homeless = Actor::new("x", "x@lab.example", Role::Developer, None);
    let scope = r.scope(&homeless);

    assert_eq!(
        scope
            .decide_user_access(&target(1, Role::Viewer, Some(HQ)))
            .await
            .unwrap()
            .reason,
        Some(DenialReason::MissingOrganization)
    );
    assert!(!scope.can_access_organization(HQ).await.unwrap());

    let actor = Actor::new("a", "a@lab.example", Role::Developer, Some(HQ));
    assert!(!r
        .can_access_user(&actor, &target(2, Role::Viewer, None))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_scope_resolves_directory_once_per_request() {
    let store = Arc::new(hierarchy());
    let r = HierarchicalAccessResolver::new(OrganizationAccessResolver::new(store.clone()));
    let actor = Actor::new("a", "a@lab.example", Role::Admin, Some(HQ));

    let scope = r.scope(&actor);
    let candidates: Vec<User> = (1..=20)
        .map(|id| target(id, Role::Viewer, Some(AFFILIATE_NORTH)))
        .collect();
    scope.filter_users(candidates).await.unwrap();
    let after_first = store.lookup_count();
    scope.can_access_organization(AFFILIATE_SOUTH).await.unwrap();
    assert_eq!(store.lookup_count(), after_first);

    // 新しいスコープは再計算する
    let next_request = r.scope(&actor);
    next_request.accessible_organizations().await.unwrap();
    assert!(store.lookup_count() > after_first);
}
