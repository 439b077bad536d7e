use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TestRecords::OrganizationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestRecords::TestType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestRecords::SampleCode).string().not_null())
                    .col(ColumnDef::new(TestRecords::RegisteredBy).string().not_null())
                    .col(
                        ColumnDef::new(TestRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_test_records_organization_id")
                    .from(TestRecords::Table, TestRecords::OrganizationId)
                    .to(Organizations::Table, Organizations::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // 組織ごとの新しい順一覧用
        manager
            .create_index(
                Index::create()
                    .name("idx_test_records_organization_created_at")
                    .table(TestRecords::Table)
                    .col(TestRecords::OrganizationId)
                    .col(TestRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TestRecords {
    Table,
    Id,
    OrganizationId,
    TestType,
    SampleCode,
    RegisteredBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
}
