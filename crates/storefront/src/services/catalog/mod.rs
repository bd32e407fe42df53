//! Catalog service: categories and the products filed under them.

mod error;

pub use error::CatalogError;

use mercantile_core::{CategoryId, ValidationErrors, ViolationKind};

use crate::db::{CatalogStore, RepositoryError};
use crate::models::{Category, Product, ProductDraft};

/// Catalog service.
pub struct CatalogService<'a, S> {
    catalog: &'a S,
}

impl<'a, S: CatalogStore> CatalogService<'a, S> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(catalog: &'a S) -> Self {
        Self { catalog }
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the name is blank.
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn create_category(&self, name: &str) -> Result<Category, CatalogError> {
        let mut errors = ValidationErrors::new();
        errors.require_present("name", Some(name));
        errors.into_result(())?;

        let category = self.catalog.create_category(name.trim()).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for every missing field, and
    /// "Category must exist" when the category id is unknown.
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, CatalogError> {
        let category_exists = match draft.category_id {
            Some(id) => self.catalog.get_category(id).await?.is_some(),
            None => false,
        };
        let product = draft.validate(category_exists)?;

        let product = self
            .catalog
            .create_product(&product)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    let mut errors = ValidationErrors::new();
                    errors.add("category", ViolationKind::MustExist);
                    CatalogError::Validation(errors)
                }
                other => CatalogError::Repository(other),
            })?;

        tracing::info!(
            product_id = %product.id,
            category_id = %product.category_id,
            "Product created"
        );
        Ok(product)
    }

    /// Products filed under a category, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn products_in_category(
        &self,
        id: CategoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self.catalog.products_in_category(id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mercantile_core::Price;

    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn test_blank_category_name() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let err = catalog.create_category("  ").await.unwrap_err();
        let CatalogError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.full_messages(), vec!["Name can't be blank"]);
    }

    #[tokio::test]
    async fn test_create_product_in_category() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);
        let category = catalog.create_category("Example Category").await.unwrap();

        let draft = ProductDraft::new(
            "Example Product",
            Price::parse("10.99").unwrap(),
            5,
            category.id,
        );
        let product = catalog.create_product(&draft).await.unwrap();

        assert_eq!(product.category_id, category.id);
        assert_eq!(
            catalog.products_in_category(category.id).await.unwrap(),
            vec![product]
        );
    }

    #[tokio::test]
    async fn test_unknown_category_must_exist() {
        let store = MemoryStore::new();
        let catalog = CatalogService::new(&store);

        let draft = ProductDraft::new(
            "Example Product",
            Price::parse("10.99").unwrap(),
            5,
            CategoryId::new(42),
        );
        let err = catalog.create_product(&draft).await.unwrap_err();
        let CatalogError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.full_messages(), vec!["Category must exist"]);
    }
}
