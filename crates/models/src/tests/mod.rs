use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Create, lookup and natural-key tests for the entity helpers
pub mod crud_tests;

/// Generic search and delete helpers
pub mod registry_tests;

/// Multi-row writes inside a transaction
pub mod transaction_tests;

/// Fresh in-memory database with the full schema applied.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
