//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! mc-cli migrate
//! ```
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded at
//! compile time.

use mercantile_storefront::config::StorefrontConfig;

use super::connect;

/// Run storefront migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn storefront(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(config).await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
