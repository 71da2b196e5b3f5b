// src/database.rs
use mongodb::{options::ClientOptions, Client};
use std::time::Duration;
use tracing::info;

/// Connect to MongoDB and verify the connection with a lightweight ping.
pub async fn connect(url: &str) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(url).await?;

    options.max_pool_size = Some(100);
    options.min_pool_size = Some(5);
    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(30));

    let client = Client::with_options(options)?;

    // Fail at startup rather than on the first request
    client.list_database_names().await?;

    info!("Connected to MongoDB");
    Ok(client)
}
