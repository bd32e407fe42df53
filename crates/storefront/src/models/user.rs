//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use mercantile_core::{Email, EmailError, UserId, ValidationErrors, ViolationKind};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A storefront user (domain type).
///
/// The password hash is never part of this type; stores hand it out only
/// alongside a user during credential lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address, casing as registered.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The persisted, non-secret part of a validated user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
}

/// A user form that passed field validation.
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    pub profile: UserProfile,
    /// Plaintext password to hash; `None` keeps the stored hash on update.
    pub password: Option<String>,
}

/// Whether a form must carry a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// New accounts always need one.
    Required,
    /// Updates may leave the password unchanged.
    Optional,
}

/// Raw registration or profile-update input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Checked against `password` only when present.
    pub password_confirmation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserForm {
    /// A fully populated form with a matching confirmation.
    #[must_use]
    pub fn new(email: &str, password: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
            password_confirmation: Some(password.to_owned()),
            first_name: Some(first_name.to_owned()),
            last_name: Some(last_name.to_owned()),
        }
    }

    /// Replace the confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: Option<&str>) -> Self {
        self.password_confirmation = confirmation.map(str::to_owned);
        self
    }

    /// The submitted email, if it parses.
    #[must_use]
    pub fn parsed_email(&self) -> Option<Email> {
        self.email.as_deref().and_then(|e| Email::parse(e).ok())
    }

    /// Check every field and collect all violations.
    ///
    /// `email_taken` is the result of the store's uniqueness lookup; it is
    /// reported after the field checks so messages come out in form order.
    ///
    /// # Errors
    ///
    /// Returns every violation found when at least one check fails.
    pub fn validate(
        &self,
        policy: PasswordPolicy,
        email_taken: bool,
    ) -> Result<ValidatedUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = if errors.require_present("email", self.email.as_deref()) {
            match self.email.as_deref().map(Email::parse) {
                Some(Ok(email)) => Some(email),
                Some(Err(EmailError::TooLong { max })) => {
                    errors.add("email", ViolationKind::TooLong { max });
                    None
                }
                _ => {
                    errors.add("email", ViolationKind::Invalid);
                    None
                }
            }
        } else {
            None
        };

        let password = self.validate_password(policy, &mut errors);

        let first_name = errors
            .require_present("first_name", self.first_name.as_deref())
            .then(|| trimmed(self.first_name.as_deref()));
        let last_name = errors
            .require_present("last_name", self.last_name.as_deref())
            .then(|| trimmed(self.last_name.as_deref()));

        if email_taken {
            errors.add("email", ViolationKind::Taken);
        }

        match (email, first_name, last_name) {
            (Some(email), Some(first_name), Some(last_name)) if errors.is_empty() => {
                Ok(ValidatedUser {
                    profile: UserProfile {
                        email,
                        first_name,
                        last_name,
                    },
                    password,
                })
            }
            _ => Err(errors),
        }
    }

    fn validate_password(
        &self,
        policy: PasswordPolicy,
        errors: &mut ValidationErrors,
    ) -> Option<String> {
        let password = self.password.as_deref().filter(|p| !p.trim().is_empty());

        let Some(password) = password else {
            if policy == PasswordPolicy::Required {
                errors.add("password", ViolationKind::Blank);
            }
            return None;
        };

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                ViolationKind::TooShort {
                    min: MIN_PASSWORD_LENGTH,
                },
            );
        }
        if password.len() > MAX_PASSWORD_BYTES {
            errors.add(
                "password",
                ViolationKind::TooLong {
                    max: MAX_PASSWORD_BYTES,
                },
            );
        }
        if let Some(confirmation) = self.password_confirmation.as_deref()
            && confirmation != password
        {
            errors.add(
                "password_confirmation",
                ViolationKind::ConfirmationMismatch { of: "password" },
            );
        }

        Some(password.to_owned())
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_owned()
}
