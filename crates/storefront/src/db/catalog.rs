//! Category and product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use mercantile_core::{CategoryId, CurrencyCode, Price, ProductId};

use super::{CatalogStore, RepositoryError, conflict_or_database};
use crate::models::{Category, NewProduct, Product};

const PRODUCT_COLUMNS: &str =
    "id, name, price, currency, quantity, category_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(r.id),
            name: r.name,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    currency: String,
    quantity: i64,
    category_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        let currency = r
            .currency
            .parse::<CurrencyCode>()
            .map_err(RepositoryError::DataCorruption)?;
        let price = Price::new(r.price, currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;
        let quantity = u32::try_from(r.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!("quantity out of range: {}", r.quantity))
        })?;

        Ok(Self {
            id: ProductId::new(r.id),
            name: r.name,
            price,
            quantity,
            category_id: CategoryId::new(r.category_id),
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Repository for category and product database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for CatalogRepository<'_> {
    async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO storefront.category (name)
            VALUES ($1)
            RETURNING id, name, created_at
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_at FROM storefront.category WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO storefront.product (name, price, currency, quantity, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(product.price.currency_code().code())
        .bind(i64::from(product.quantity))
        .bind(product.category_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "category does not exist"))?;

        Product::try_from(row)
    }

    async fn products_in_category(&self, id: CategoryId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product \
             WHERE category_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
