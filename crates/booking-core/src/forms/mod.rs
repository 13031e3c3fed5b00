//! Client-side form validation.
//!
//! Every form is checked before it is turned into a request. Errors are
//! collected per field so a front end can show all of them at once.

mod auth;
mod booking;
mod profile;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub use auth::{LoginForm, RegisterForm};
pub use booking::BookingForm;
pub use profile::UpdateProfileForm;

/// Input that can be checked before submission.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All rejected fields of one form, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record `message` for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static DATE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiled once per process.
fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

fn date_pattern() -> Option<&'static Regex> {
    DATE_PATTERN
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok())
        .as_ref()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

/// `YYYY-MM-DD` shape only; calendar validity is checked separately.
pub(crate) fn is_date_shaped(value: &str) -> bool {
    date_pattern().is_some_and(|re| re.is_match(value))
}

pub(crate) fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}
