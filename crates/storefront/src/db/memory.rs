//! Process-local store.
//!
//! Mirrors the constraints of the `PostgreSQL` schema (case-insensitive
//! unique email, category foreign key) so services behave the same against
//! either backend.

use chrono::Utc;
use tokio::sync::RwLock;

use mercantile_core::{CategoryId, ProductId, UserId};

use super::{CatalogStore, RepositoryError, UserStore};
use crate::models::{Category, NewProduct, Product, User, UserProfile};

/// In-memory implementation of [`UserStore`] and [`CatalogStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    categories: Vec<Category>,
    products: Vec<Product>,
}

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

impl StoredUser {
    fn matches(&self, normalized_email: &str) -> bool {
        self.user.email.normalized() == normalized_email
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Next 1-based id for a table holding `len` rows. Rows are never deleted.
fn next_id(len: usize) -> Result<i32, RepositoryError> {
    len.checked_add(1)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| RepositoryError::DataCorruption("id space exhausted".to_owned()))
}

impl UserStore for MemoryStore {
    async fn find_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.matches(normalized_email))
            .map(|u| (u.user.clone(), u.password_hash.clone())))
    }

    async fn email_taken(
        &self,
        normalized_email: &str,
        except: Option<UserId>,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .any(|u| u.matches(normalized_email) && Some(u.user.id) != except))
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn create(
        &self,
        profile: &UserProfile,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        let normalized = profile.email.normalized();
        if state.users.iter().any(|u| u.matches(&normalized)) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(next_id(state.users.len())?),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        });

        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
        password_hash: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        let normalized = profile.email.normalized();
        if state
            .users
            .iter()
            .any(|u| u.matches(&normalized) && u.user.id != id)
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let stored = state
            .users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(RepositoryError::NotFound)?;

        stored.user.email = profile.email.clone();
        stored.user.first_name.clone_from(&profile.first_name);
        stored.user.last_name.clone_from(&profile.last_name);
        stored.user.updated_at = Utc::now();
        if let Some(hash) = password_hash {
            hash.clone_into(&mut stored.password_hash);
        }

        Ok(stored.user.clone())
    }
}

impl CatalogStore for MemoryStore {
    async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let mut state = self.state.write().await;
        let category = Category {
            id: CategoryId::new(next_id(state.categories.len())?),
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.categories.iter().any(|c| c.id == product.category_id) {
            return Err(RepositoryError::Conflict(
                "category does not exist".to_owned(),
            ));
        }

        let now = Utc::now();
        let stored = Product {
            id: ProductId::new(next_id(state.products.len())?),
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        };
        state.products.push(stored.clone());
        Ok(stored)
    }

    async fn products_in_category(&self, id: CategoryId) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .filter(|p| p.category_id == id)
            .cloned()
            .collect())
    }
}
