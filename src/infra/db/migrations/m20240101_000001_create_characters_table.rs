//! Migration: Create characters table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Characters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Characters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Characters::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Characters::DateOfBirth).date().not_null())
                    .col(
                        ColumnDef::new(Characters::Occupation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Characters::IsSuspect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Characters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Characters {
    Table,
    Id,
    Name,
    DateOfBirth,
    Occupation,
    IsSuspect,
}
