//! Mercantile Storefront library.
//!
//! Accounts and catalog for the storefront: validated writes, the stores
//! they are persisted to, and the credential authenticator.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`db`] - Store traits plus in-memory and `PostgreSQL` implementations
//! - [`models`] - Domain types and their forms
//! - [`services`] - Account registration/authentication and catalog writes
//! - [`telemetry`] - Tracing and Sentry setup for binaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod telemetry;
