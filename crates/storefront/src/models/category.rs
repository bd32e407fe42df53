//! Product category.

use chrono::{DateTime, Utc};

use mercantile_core::CategoryId;

/// A product category. Products reference exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
