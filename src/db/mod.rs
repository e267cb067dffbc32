use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "lms-server";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the application database. Cloning shares the driver pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    inner: mongodb::Database,
}

pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.app_name = Some(APP_NAME.to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    options.min_pool_size = Some(config.mongo_max_pool_size.min(2));
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    Ok(options)
}

impl Database {
    /// Connects and pings once so a bad connection string fails at startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let database = Self {
            inner: client.database(&config.mongo_db_name),
            client,
        };

        database.health_check().await?;
        log::info!(
            "Connected to MongoDB database '{}' (pool size {})",
            config.mongo_db_name,
            config.mongo_max_pool_size
        );

        Ok(database)
    }

    pub fn get_collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.inner.collection(name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }
}
