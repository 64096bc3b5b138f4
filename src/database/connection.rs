use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::errors::Result;

const DEFAULT_DB_NAME: &str = "posts";

/// Build the database handle from the connection string. The driver connects
/// lazily, so only a malformed URL fails here; an unreachable server is
/// surfaced by the startup ping below as a warning and requests simply fail
/// at the storage layer until it comes back.
pub async fn connect(database_url: &str) -> Result<Database> {
    let client = Client::with_uri_str(database_url).await?;

    let db = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DB_NAME));

    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => tracing::info!("connected to database '{}'", db.name()),
        Err(e) => tracing::warn!("database '{}' unreachable at startup: {}", db.name(), e),
    }

    Ok(db)
}
