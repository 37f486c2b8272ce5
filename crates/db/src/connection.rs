use std::time::Duration;

use mongodb::{Client, Database, options::ClientOptions};
use swimbuddz_config::DatabaseSettings;
use tracing::info;

const APP_NAME: &str = "swimbuddz-readiness";

/// Opens a client, pings the server and returns the configured database.
pub async fn connect(settings: &DatabaseSettings) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&settings.url).await?;
    client_options.app_name = Some(APP_NAME.to_string());
    client_options.server_selection_timeout = Some(Duration::from_secs(5));
    client_options.max_pool_size = settings.max_pool_size;
    client_options.min_pool_size = settings.min_pool_size;

    let client = Client::with_options(client_options)?;

    client
        .database("admin")
        .run_command(bson::doc! { "ping": 1 })
        .await?;

    info!(db = %settings.name, "Connected to MongoDB");

    Ok(client.database(&settings.name))
}
