//! Database connection management

use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::{Client, Database};
use roster_config::DatabaseConfig;
use tracing::info;

/// Prepare and establish a database connection.
///
/// The server must not start serving if the store is unreachable, so
/// this pings the deployment before handing the database out.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.url)
        .await
        .with_context(|| format!("failed to parse mongodb connection string {}", config.url))?;

    let database = client.database(&config.database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("failed to reach mongodb at {}", config.url))?;

    info!(url = %config.url, database = %config.database, "database connection established");
    Ok(database)
}
