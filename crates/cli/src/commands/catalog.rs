//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! mc-cli catalog category "Example Category"
//! mc-cli catalog product -n "Example Product" -p 10.99 -q 5 -c 1
//! mc-cli catalog list 1
//! ```

use mercantile_core::{CategoryId, Price};
use mercantile_storefront::config::StorefrontConfig;
use mercantile_storefront::db::CatalogRepository;
use mercantile_storefront::models::ProductDraft;
use mercantile_storefront::services::{CatalogError, CatalogService};

use super::connect;

/// Flatten validation failures into one readable error.
fn describe(e: CatalogError) -> Box<dyn std::error::Error> {
    match e {
        CatalogError::Validation(errors) => errors.full_messages().join("; ").into(),
        other => other.into(),
    }
}

/// Create a category.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the name is blank.
pub async fn create_category(
    config: &StorefrontConfig,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(config).await?;
    let catalog = CatalogRepository::new(&pool);

    let category = CatalogService::new(&catalog)
        .create_category(name)
        .await
        .map_err(describe)?;

    tracing::info!(category_id = %category.id, "Created category {}", category.name);
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns an error if the price does not parse, the database is
/// unreachable, or the product is invalid.
pub async fn create_product(
    config: &StorefrontConfig,
    name: &str,
    price: &str,
    quantity: u32,
    category: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let price = Price::parse(price)?;
    let draft = ProductDraft::new(name, price, quantity, CategoryId::new(category));

    let pool = connect(config).await?;
    let catalog = CatalogRepository::new(&pool);

    let product = CatalogService::new(&catalog)
        .create_product(&draft)
        .await
        .map_err(describe)?;

    tracing::info!(
        product_id = %product.id,
        price = %product.price,
        quantity = product.quantity,
        "Created product {}",
        product.name
    );
    Ok(())
}

/// List the products of a category.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn list(
    config: &StorefrontConfig,
    category: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(config).await?;
    let catalog = CatalogRepository::new(&pool);

    let products = CatalogService::new(&catalog)
        .products_in_category(CategoryId::new(category))
        .await?;

    tracing::info!(category_id = category, count = products.len(), "Products");
    for product in products {
        tracing::info!(
            "  #{} {} ({} x {})",
            product.id,
            product.name,
            product.quantity,
            product.price
        );
    }
    Ok(())
}
