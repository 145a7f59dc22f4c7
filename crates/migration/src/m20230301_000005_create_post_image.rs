//! Create `post_image` table with FK to `post`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostImage::Table)
                    .if_not_exists()
                    .col(uuid(PostImage::Id).primary_key())
                    .col(uuid(PostImage::PostId).not_null())
                    .col(string_len(PostImage::Url, 512).not_null())
                    .col(timestamp_with_time_zone(PostImage::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_image_post")
                            .from(PostImage::Table, PostImage::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostImage { Table, Id, PostId, Url, CreatedAt }

#[derive(DeriveIden)]
enum Post { Table, Id }
