//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration, update and credential authentication
//! - `catalog` - Category and product creation

pub mod auth;
pub mod catalog;

pub use auth::{AuthError, AuthService, PasswordHasher};
pub use catalog::{CatalogError, CatalogService};
