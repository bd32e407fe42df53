//! Core types for Mercantile.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod validation;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, MAX_PRICE_AMOUNT, PRICE_SCALE, Price, PriceError};
pub use validation::{ValidationErrors, Violation, ViolationKind};
