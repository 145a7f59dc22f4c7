//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20230301_000001_create_address;
mod m20230301_000002_create_pet;
mod m20230301_000003_create_info_map;
mod m20230301_000004_create_post;
mod m20230301_000005_create_post_image;
mod m20230301_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230301_000001_create_address::Migration),
            Box::new(m20230301_000002_create_pet::Migration),
            Box::new(m20230301_000003_create_info_map::Migration),
            Box::new(m20230301_000004_create_post::Migration),
            Box::new(m20230301_000005_create_post_image::Migration),
            // Indexes should always be applied last
            Box::new(m20230301_000009_add_indexes::Migration),
        ]
    }
}
