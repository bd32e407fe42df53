//! CLI command implementations.

pub mod catalog;
pub mod migrate;
pub mod user;

use mercantile_storefront::config::StorefrontConfig;
use mercantile_storefront::db;
use sqlx::PgPool;

/// Connect to the storefront database.
async fn connect(config: &StorefrontConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to storefront database...");
    db::create_pool(&config.database_url).await
}
