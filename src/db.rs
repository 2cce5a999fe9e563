use std::time::Duration;

use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::info;

use crate::config::DbConfig;
use crate::errors::Result;

pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

/// Opens a bounded pool; every store operation borrows a connection from it
/// and hands it back when the query future completes or is dropped.
pub async fn init_db(config: &DbConfig) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(connect_options(config))
        .await?;

    info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(pool)
}
