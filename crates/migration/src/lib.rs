//! Migrator for the two-table schema.
//! Indexes are applied last; the unique ones back the service-level
//! uniqueness checks at write time.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_group;
mod m20240301_000002_create_student;
mod m20240301_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_group::Migration),
            Box::new(m20240301_000002_create_student::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000003_add_indexes::Migration),
        ]
    }
}
