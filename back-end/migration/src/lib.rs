pub use sea_orm_migration::prelude::*;

mod m20260301_100000_create_project;
mod m20260301_100001_create_tutorial;
mod m20260301_100002_create_article;
mod m20260301_100003_create_step;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_100000_create_project::Migration),
            Box::new(m20260301_100001_create_tutorial::Migration),
            Box::new(m20260301_100002_create_article::Migration),
            Box::new(m20260301_100003_create_step::Migration),
        ]
    }
}
