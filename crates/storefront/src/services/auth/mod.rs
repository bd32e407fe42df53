//! Authentication service.
//!
//! Provides account registration and update, and the email/password
//! credential check.

mod error;
mod password;

pub use error::AuthError;
pub use password::PasswordHasher;

use mercantile_core::{Email, UserId, ValidationErrors, ViolationKind};

use crate::db::{RepositoryError, UserStore};
use crate::models::{PasswordPolicy, User, UserForm};

/// Authentication service.
///
/// Handles user registration, profile updates and password login against
/// any [`UserStore`].
pub struct AuthService<'a, S> {
    users: &'a S,
    hasher: &'a PasswordHasher,
}

impl<'a, S: UserStore> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a S, hasher: &'a PasswordHasher) -> Self {
        Self { users, hasher }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with every field violation, including
    /// "Email has already been taken" when another account uses the email in
    /// any casing.
    /// Returns `AuthError::PasswordHash` or `AuthError::Repository` on
    /// infrastructure failures.
    pub async fn register(&self, form: &UserForm) -> Result<User, AuthError> {
        let taken = self.email_taken(form, None).await?;
        let valid = form.validate(PasswordPolicy::Required, taken)?;

        let Some(password) = valid.password.as_deref() else {
            return Err(blank_password().into());
        };
        let password_hash = self.hasher.hash(password)?;

        let user = self
            .users
            .create(&valid.profile, &password_hash)
            .await
            .map_err(taken_on_conflict)?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Update an existing user's profile.
    ///
    /// A blank password keeps the current one; a present password is
    /// validated and re-hashed like at registration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if `id` is unknown.
    /// Returns `AuthError::Validation` with every field violation.
    /// Returns `AuthError::PasswordHash` or `AuthError::Repository` on
    /// infrastructure failures.
    pub async fn update(&self, id: UserId, form: &UserForm) -> Result<User, AuthError> {
        if self.users.get_by_id(id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let taken = self.email_taken(form, Some(id)).await?;
        let valid = form.validate(PasswordPolicy::Optional, taken)?;

        let password_hash = valid
            .password
            .as_deref()
            .map(|p| self.hasher.hash(p))
            .transpose()?;

        let user = self
            .users
            .update(id, &valid.profile, password_hash.as_deref())
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => taken_on_conflict(other),
            })?;

        tracing::info!(
            user_id = %user.id,
            password_changed = password_hash.is_some(),
            "User updated"
        );
        Ok(user)
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Find the account for an email/password pair.
    ///
    /// The email is trimmed and compared case-insensitively; the password is
    /// compared verbatim against the stored hash. An unknown email and a
    /// wrong password both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` only if the store itself fails.
    pub async fn authenticate_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let normalized = Email::normalize(email);

        let Some((user, password_hash)) = self.users.find_by_email(&normalized).await? else {
            tracing::debug!("Authentication failed");
            return Ok(None);
        };

        if !self.hasher.verify(password, &password_hash) {
            tracing::debug!("Authentication failed");
            return Ok(None);
        }

        tracing::debug!(user_id = %user.id, "Authentication succeeded");
        Ok(Some(user))
    }

    async fn email_taken(
        &self,
        form: &UserForm,
        except: Option<UserId>,
    ) -> Result<bool, AuthError> {
        match form.parsed_email() {
            Some(email) => Ok(self.users.email_taken(&email.normalized(), except).await?),
            None => Ok(false),
        }
    }
}

fn blank_password() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("password", ViolationKind::Blank);
    errors
}

/// A unique-index violation that slipped past the uniqueness check.
fn taken_on_conflict(e: RepositoryError) -> AuthError {
    match e {
        RepositoryError::Conflict(_) => {
            let mut errors = ValidationErrors::new();
            errors.add("email", ViolationKind::Taken);
            AuthError::Validation(errors)
        }
        other => AuthError::Repository(other),
    }
}
