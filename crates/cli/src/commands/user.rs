//! User account commands.
//!
//! # Usage
//!
//! ```bash
//! mc-cli user create -e jane@example.com -p 'correct horse' -f Jane -l Doe
//! mc-cli user authenticate -e jane@example.com -p 'correct horse'
//! ```

use thiserror::Error;

use mercantile_storefront::config::StorefrontConfig;
use mercantile_storefront::db::UserRepository;
use mercantile_storefront::models::UserForm;
use mercantile_storefront::services::{AuthError, AuthService, PasswordHasher};

use super::connect;

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// The form was rejected.
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    /// The credentials did not match an account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any other failure.
    #[error(transparent)]
    Auth(AuthError),
}

impl From<AuthError> for UserCommandError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(errors) => Self::Invalid(errors.full_messages()),
            other => Self::Auth(other),
        }
    }
}

/// Build a registration form from command-line arguments.
#[must_use]
pub fn form(
    email: &str,
    password: &str,
    password_confirmation: Option<&str>,
    first_name: &str,
    last_name: &str,
) -> UserForm {
    UserForm::new(email, password, first_name, last_name)
        .with_confirmation(password_confirmation.or(Some(password)))
}

/// Register a new user.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the form is invalid.
pub async fn create(
    config: &StorefrontConfig,
    form: &UserForm,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(config).await?;
    let users = UserRepository::new(&pool);
    let hasher = PasswordHasher::new(&config.hashing)?;

    let user = AuthService::new(&users, &hasher)
        .register(form)
        .await
        .map_err(UserCommandError::from)?;

    tracing::info!(user_id = %user.id, email = %user.email, "Created user {}", user.full_name());
    Ok(())
}

/// Check an email/password pair.
///
/// # Errors
///
/// Returns `UserCommandError::InvalidCredentials` when the pair does not
/// match an account, or an error if the database is unreachable.
pub async fn authenticate(
    config: &StorefrontConfig,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(config).await?;
    let users = UserRepository::new(&pool);
    let hasher = PasswordHasher::new(&config.hashing)?;

    let user = AuthService::new(&users, &hasher)
        .authenticate_with_credentials(email, password)
        .await
        .map_err(UserCommandError::from)?
        .ok_or(UserCommandError::InvalidCredentials)?;

    tracing::info!(user_id = %user.id, email = %user.email, "Credentials are valid");
    Ok(())
}
