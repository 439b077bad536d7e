use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    // independent / headquarters / affiliate
                    .col(
                        ColumnDef::new(Organizations::OrganizationType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Organizations::ParentOrganizationId).integer())
                    // NULL は isolated として扱う
                    .col(ColumnDef::new(Organizations::AccessLevel).string_len(32))
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 親組織への自己参照。親の削除は子を孤立させない
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_organizations_parent_organization_id")
                    .from(Organizations::Table, Organizations::ParentOrganizationId)
                    .to(Organizations::Table, Organizations::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_parent_organization_id")
                    .table(Organizations::Table)
                    .col(Organizations::ParentOrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    OrganizationType,
    ParentOrganizationId,
    AccessLevel,
    CreatedAt,
    UpdatedAt,
}
