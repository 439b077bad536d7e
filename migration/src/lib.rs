// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 組織階層
mod m20251001_000001_create_organizations_table;
// ユーザー（ロールと所属組織）
mod m20251001_000002_create_users_table;
// 組織に属する試験記録・機材
mod m20251001_000003_create_test_records_table;
mod m20251001_000004_create_equipment_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_organizations_table::Migration),
            Box::new(m20251001_000002_create_users_table::Migration),
            Box::new(m20251001_000003_create_test_records_table::Migration),
            Box::new(m20251001_000004_create_equipment_table::Migration),
        ]
    }
}
