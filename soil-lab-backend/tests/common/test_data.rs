// tests/common/test_data.rs

use chrono::{Duration, Utc};
use soil_lab_backend::domain::organization_model::{AccessLevel, Organization};
use soil_lab_backend::domain::{equipment_model, test_record_model, user_model};
use soil_lab_backend::repository::memory::InMemoryStore;

pub const HQ: i32 = 1;
pub const AFFILIATE_NORTH: i32 = 2;
pub const AFFILIATE_SOUTH: i32 = 3;
pub const AFFILIATE_FULL: i32 = 4;
pub const INDEPENDENT: i32 = 10;

pub fn user(id: i32, role: &str, organization_id: Option<i32>) -> user_model::Model {
    user_model::Model {
        id,
        uid: format!("uid-{}", id),
        email: format!("user{}@lab.example", id),
        display_name: format!("User {}", id),
        role: role.to_string(),
        organization_id,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_record(id: i32, organization_id: i32, minutes_ago: i64) -> test_record_model::Model {
    test_record_model::Model {
        id,
        organization_id,
        test_type: "real_density".to_string(),
        sample_code: format!("AM-{:03}", id),
        registered_by: "uid-tech".to_string(),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

pub fn equipment(id: i32, organization_id: i32) -> equipment_model::Model {
    equipment_model::Model {
        id,
        organization_id,
        name: format!("Balança {}", id),
        kind: "scale".to_string(),
        calibration_due: None,
        created_at: Utc::now(),
    }
}

/// 本部1 → 関連組織2,3(isolated),4(full_hierarchy)、独立組織10
pub fn hierarchy() -> InMemoryStore {
    InMemoryStore::new()
        .with_organization(Organization::headquarters(HQ, "Matriz São Paulo"))
        .with_organization(Organization::affiliate(AFFILIATE_NORTH, "Filial Norte", HQ))
        .with_organization(Organization::affiliate(AFFILIATE_SOUTH, "Filial Sul", HQ))
        .with_organization(
            Organization::affiliate(AFFILIATE_FULL, "Filial Leste", HQ)
                .with_access_level(AccessLevel::FullHierarchy),
        )
        .with_organization(Organization::independent(INDEPENDENT, "Lab Independente"))
}

/// 階層 + 各組織のユーザー・記録・機材
pub fn populated_store() -> InMemoryStore {
    hierarchy()
        .with_user(user(1, "ADMIN", Some(HQ)))
        .with_user(user(2, "VIEWER", Some(AFFILIATE_NORTH)))
        .with_user(user(3, "TECHNICIAN", Some(AFFILIATE_NORTH)))
        .with_user(user(4, "DEVELOPER", Some(AFFILIATE_NORTH)))
        .with_user(user(5, "MANAGER", Some(AFFILIATE_SOUTH)))
        .with_user(user(6, "SUPERVISOR", Some(INDEPENDENT)))
        .with_user(user(7, "VIEWER", None))
        .with_test_record(test_record(1, HQ, 50))
        .with_test_record(test_record(2, AFFILIATE_NORTH, 40))
        .with_test_record(test_record(3, AFFILIATE_SOUTH, 30))
        .with_test_record(test_record(4, INDEPENDENT, 20))
        .with_equipment(equipment(1, HQ))
        .with_equipment(equipment(2, AFFILIATE_NORTH))
}
