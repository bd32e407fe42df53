//! Domain models for storefront.
//!
//! Each model comes with a form type holding raw, possibly missing input.
//! Forms validate into the values the stores persist; nothing is validated
//! implicitly on save.
//!
//! - [`user`] - Accounts (`User`, `UserForm`)
//! - [`category`] - Product categories
//! - [`product`] - Products (`Product`, `ProductDraft`)

pub mod category;
pub mod product;
pub mod user;

pub use category::Category;
pub use product::{NewProduct, Product, ProductDraft};
pub use user::{PasswordPolicy, User, UserForm, UserProfile, ValidatedUser};
