//! Mercantile Core - Shared types library.
//!
//! This crate provides common types used across all Mercantile components:
//! - `storefront` - Accounts, catalog, stores and the credential authenticator
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   field-level validation results

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
