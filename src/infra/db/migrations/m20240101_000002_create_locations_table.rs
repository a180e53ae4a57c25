//! Migration: Create locations table with a cascading character reference.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_characters_table::Characters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Locations::CharacterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Locations::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::Lat).double().not_null())
                    .col(ColumnDef::new(Locations::Lon).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_character_id")
                            .from(Locations::Table, Locations::CharacterId)
                            .to(Characters::Table, Characters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_locations_character_id")
                    .table(Locations::Table)
                    .col(Locations::CharacterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_locations_character_id")
                    .table(Locations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    CharacterId,
    Timestamp,
    Lat,
    Lon,
}
