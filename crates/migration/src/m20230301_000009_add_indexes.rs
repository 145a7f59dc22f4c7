use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pets: index on address_id
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_address")
                    .table(Pet::Table)
                    .col(Pet::AddressId)
                    .to_owned(),
            )
            .await?;

        // InfoMap: index on address_id
        manager
            .create_index(
                Index::create()
                    .name("idx_info_map_address")
                    .table(InfoMap::Table)
                    .col(InfoMap::AddressId)
                    .to_owned(),
            )
            .await?;

        // Posts: index on pet_id
        manager
            .create_index(
                Index::create()
                    .name("idx_post_pet")
                    .table(Post::Table)
                    .col(Post::PetId)
                    .to_owned(),
            )
            .await?;

        // PostImage: index on post_id
        manager
            .create_index(
                Index::create()
                    .name("idx_post_image_post")
                    .table(PostImage::Table)
                    .col(PostImage::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pet_address").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_info_map_address").table(InfoMap::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_pet").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_post_image_post").table(PostImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, AddressId }

#[derive(DeriveIden)]
enum InfoMap { Table, AddressId }

#[derive(DeriveIden)]
enum Post { Table, PetId }

#[derive(DeriveIden)]
enum PostImage { Table, PostId }
