//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod audit;
mod m20220101_000011_create_address;
mod m20220101_000012_create_person;
mod m20220101_000013_create_contact;
mod m20220101_000014_create_department;
mod m20220101_000015_create_resource_meta;
mod m20220101_000016_create_unique_id;
mod m20220101_000017_create_users;
mod m20220101_000018_create_contact_person;
mod m20220101_000019_create_company;
mod m20220101_000020_create_employee;
mod m20220101_000021_create_numbering;
mod m20220101_000022_create_postal;
mod m20220101_000023_create_spectrum;
mod m20220101_000024_create_telecom;
mod m20220101_000025_create_typeapproval;
mod m20220101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000011_create_address::Migration),
            Box::new(m20220101_000012_create_person::Migration),
            Box::new(m20220101_000013_create_contact::Migration),
            Box::new(m20220101_000014_create_department::Migration),
            Box::new(m20220101_000015_create_resource_meta::Migration),
            Box::new(m20220101_000016_create_unique_id::Migration),
            Box::new(m20220101_000017_create_users::Migration),
            Box::new(m20220101_000018_create_contact_person::Migration),
            Box::new(m20220101_000019_create_company::Migration),
            Box::new(m20220101_000020_create_employee::Migration),
            Box::new(m20220101_000021_create_numbering::Migration),
            Box::new(m20220101_000022_create_postal::Migration),
            Box::new(m20220101_000023_create_spectrum::Migration),
            Box::new(m20220101_000024_create_telecom::Migration),
            Box::new(m20220101_000025_create_typeapproval::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000002_add_indexes::Migration),
        ]
    }
}
