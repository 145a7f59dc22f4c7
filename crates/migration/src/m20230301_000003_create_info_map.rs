//! Create `info_map` table with FK to `address`.
//!
//! Auxiliary per-address metadata entries.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InfoMap::Table)
                    .if_not_exists()
                    .col(uuid(InfoMap::Id).primary_key())
                    .col(uuid(InfoMap::AddressId).not_null())
                    .col(string_len(InfoMap::Category, 64).not_null())
                    .col(string_len(InfoMap::Name, 128).not_null())
                    .col(timestamp_with_time_zone(InfoMap::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_info_map_address")
                            .from(InfoMap::Table, InfoMap::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(InfoMap::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum InfoMap { Table, Id, AddressId, Category, Name, CreatedAt }

#[derive(DeriveIden)]
enum Address { Table, Id }
