#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the schema applied; each test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}
