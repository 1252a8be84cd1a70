//! Database migrations

use sea_orm_migration::prelude::*;

mod m20240801_000001_init_schema;
mod m20240815_000001_create_attributes;
mod m20240902_000001_add_attribute_flags;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240801_000001_init_schema::Migration),
            Box::new(m20240815_000001_create_attributes::Migration),
            Box::new(m20240902_000001_add_attribute_flags::Migration),
        ]
    }
}
