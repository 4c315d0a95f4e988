//! Database connection and bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;
use crate::store::StoreResult;
use crate::store::postgres::PgEmployeeStore;

/// Open a pooled connection for `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.connection_string());
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Round-trip a trivial query.
pub async fn ping(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}

/// PostgreSQL server version string.
pub async fn server_version(db: &DatabaseConnection) -> Result<String, DbErr> {
    let row = db
        .query_one(Statement::from_string(DatabaseBackend::Postgres, "SELECT version()"))
        .await?;

    match row {
        Some(row) => row.try_get("", "version"),
        None => Ok("Unknown".to_owned()),
    }
}

/// Connect, create the collection table if needed and log what was found.
pub async fn open_store(config: &DatabaseConfig) -> StoreResult<PgEmployeeStore> {
    let db = connect(config).await?;
    ping(&db).await?;

    match server_version(&db).await {
        Ok(version) => info!("PostgreSQL: {}", version),
        Err(e) => tracing::warn!("Could not read server version: {}", e),
    }

    let store = PgEmployeeStore::new(db, config.collection.clone())?;
    store.ensure_schema().await?;
    info!("Collection '{}': {} employees", config.collection, store.count().await?);

    Ok(store)
}
