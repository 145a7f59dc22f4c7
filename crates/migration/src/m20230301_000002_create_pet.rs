//! Create `pet` table with FK to `address`.
//!
//! Stores pet accounts; `login_id` is the unique credential key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(uuid(Pet::Id).primary_key())
                    .col(string_len(Pet::LoginId, 64).unique_key().not_null())
                    .col(string_len(Pet::Password, 255).not_null())
                    .col(string_len(Pet::PetName, 64).not_null())
                    .col(integer(Pet::Age).not_null())
                    .col(string_len(Pet::Gender, 16).not_null())
                    .col(string_len(Pet::Species, 64).not_null())
                    // Explicitly define nullable profile_image to avoid conflicting NULL/NOT NULL
                    .col(
                        ColumnDef::new(Pet::ProfileImage)
                            .string_len(512)
                            .null(),
                    )
                    .col(string_len(Pet::Roles, 255).not_null())
                    .col(uuid(Pet::AddressId).not_null())
                    .col(timestamp_with_time_zone(Pet::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Pet::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_address")
                            .from(Pet::Table, Pet::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, Id, LoginId, Password, PetName, Age, Gender, Species, ProfileImage, Roles, AddressId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Address { Table, Id }
