//! Field-level validation results.
//!
//! Validation never fails fast: a form is checked completely and every
//! problem is collected into [`ValidationErrors`], so a caller can show all
//! of them at once.
//!
//! Messages are rendered as full sentences prefixed with the humanized
//! attribute name, e.g. `first_name` + [`ViolationKind::Blank`] renders as
//! `"First name can't be blank"`.

use core::fmt;

use serde::Serialize;

/// What is wrong with a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Missing, empty, or whitespace-only.
    Blank,
    /// Present but malformed.
    Invalid,
    /// Another record already uses this value.
    Taken,
    /// A confirmation field differs from the field it confirms.
    ConfirmationMismatch {
        /// Attribute being confirmed.
        of: &'static str,
    },
    /// Shorter than allowed.
    TooShort {
        /// Minimum length.
        min: usize,
    },
    /// Longer than allowed.
    TooLong {
        /// Maximum length.
        max: usize,
    },
    /// A referenced record does not exist.
    MustExist,
}

impl ViolationKind {
    /// The message that follows the attribute name.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Blank => "can't be blank".to_owned(),
            Self::Invalid => "is invalid".to_owned(),
            Self::Taken => "has already been taken".to_owned(),
            Self::ConfirmationMismatch { of } => format!("doesn't match {}", humanize(of)),
            Self::TooShort { min } => format!("is too short (minimum is {min} characters)"),
            Self::TooLong { max } => format!("is too long (maximum is {max} characters)"),
            Self::MustExist => "must exist".to_owned(),
        }
    }
}

/// A single problem with a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Attribute name in `snake_case`.
    pub attribute: &'static str,
    /// What is wrong with it.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Full sentence for this violation, e.g. `"Email has already been taken"`.
    #[must_use]
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(self.attribute), self.kind.message())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_message())
    }
}

/// An ordered collection of violations for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed: {}", join_messages(.0))]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a violation.
    pub fn add(&mut self, attribute: &'static str, kind: ViolationKind) {
        self.0.push(Violation { attribute, kind });
    }

    /// Record [`ViolationKind::Blank`] for `attribute` if `value` is missing
    /// or whitespace-only. Returns `true` when the value was present.
    pub fn require_present(&mut self, attribute: &'static str, value: Option<&str>) -> bool {
        let present = value.is_some_and(|v| !v.trim().is_empty());
        if !present {
            self.add(attribute, ViolationKind::Blank);
        }
        present
    }

    /// Record [`ViolationKind::Blank`] for `attribute` if `value` is `None`.
    /// Returns `true` when the value was present.
    pub fn require_some<T>(&mut self, attribute: &'static str, value: Option<&T>) -> bool {
        if value.is_none() {
            self.add(attribute, ViolationKind::Blank);
        }
        value.is_some()
    }

    /// Whether no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the recorded violations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Whether `attribute` has any violation.
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.0.iter().any(|v| v.attribute == attribute)
    }

    /// Every violation rendered as a full sentence.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.0.iter().map(Violation::full_message).collect()
    }

    /// `Ok(value)` if nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected violations when there is at least one.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::full_message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `first_name` -> `First name`.
fn humanize(attribute: &str) -> String {
    let spaced = attribute.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
