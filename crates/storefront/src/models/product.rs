//! Product domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use mercantile_core::{CategoryId, Price, ProductId, ValidationErrors, ViolationKind};

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Units in stock.
    pub quantity: u32,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub category_id: CategoryId,
}

/// Raw product input; every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u32>,
    pub category_id: Option<CategoryId>,
}

impl ProductDraft {
    /// A fully populated draft.
    #[must_use]
    pub fn new(name: &str, price: Price, quantity: u32, category_id: CategoryId) -> Self {
        Self {
            name: Some(name.to_owned()),
            price: Some(price),
            quantity: Some(quantity),
            category_id: Some(category_id),
        }
    }

    /// Check presence of every field.
    ///
    /// `category_exists` is whether the store knows the referenced category;
    /// it only matters when a category was given at all.
    ///
    /// # Errors
    ///
    /// Returns every violation found when at least one check fails.
    pub fn validate(&self, category_exists: bool) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require_present("name", self.name.as_deref());
        errors.require_some("price", self.price.as_ref());
        errors.require_some("quantity", self.quantity.as_ref());
        if errors.require_some("category", self.category_id.as_ref()) && !category_exists {
            errors.add("category", ViolationKind::MustExist);
        }

        match (&self.name, self.price, self.quantity, self.category_id) {
            (Some(name), Some(price), Some(quantity), Some(category_id)) if errors.is_empty() => {
                Ok(NewProduct {
                    name: name.trim().to_owned(),
                    price,
                    quantity,
                    category_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft::new(
            "Example Product",
            Price::parse("10.99").unwrap(),
            5,
            CategoryId::new(1),
        )
    }

    #[test]
    fn test_valid_draft() {
        let product = valid_draft().validate(true).unwrap();
        assert_eq!(product.name, "Example Product");
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn test_each_missing_field_is_blank() {
        let cases: [(fn(&mut ProductDraft), &str); 4] = [
            (|d| d.name = None, "Name can't be blank"),
            (|d| d.price = None, "Price can't be blank"),
            (|d| d.quantity = None, "Quantity can't be blank"),
            (|d| d.category_id = None, "Category can't be blank"),
        ];

        for (clear, expected) in cases {
            let mut draft = valid_draft();
            clear(&mut draft);
            let errors = draft.validate(true).unwrap_err();
            assert_eq!(errors.full_messages(), vec![expected]);
        }
    }

    #[test]
    fn test_unknown_category() {
        let errors = valid_draft().validate(false).unwrap_err();
        assert_eq!(errors.full_messages(), vec!["Category must exist"]);
    }

    #[test]
    fn test_deserialized_draft_rejects_bad_price() {
        let draft: ProductDraft = serde_json::from_str(
            r#"{"name":"Mug","price":{"amount":"4.50","currency_code":"USD"},"quantity":3,"category_id":1}"#,
        )
        .unwrap();
        assert!(draft.validate(true).is_ok());

        let negative = serde_json::from_str::<ProductDraft>(
            r#"{"name":"Mug","price":{"amount":"-4.50","currency_code":"USD"},"quantity":3,"category_id":1}"#,
        );
        assert!(negative.is_err());
    }

    #[test]
    fn test_zero_quantity_is_present() {
        let mut draft = valid_draft();
        draft.quantity = Some(0);
        assert!(draft.validate(true).is_ok());
    }
}
