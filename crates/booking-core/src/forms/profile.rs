//! Profile update form.

use std::fmt;

use serde::Serialize;

use super::{Validate, ValidationErrors, has_min_chars, is_valid_email};

/// Changes to the signed-in user's profile.
///
/// The current password is always required; an empty new password means
/// "keep the current one" and is left out of the request body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileForm {
    name: String,
    email: String,
    current_password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    new_password: String,
}

impl UpdateProfileForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        current_password: impl Into<String>,
        new_password: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            current_password: current_password.into(),
            new_password: new_password.unwrap_or_default(),
        }
    }
}

impl Validate for UpdateProfileForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            has_min_chars(&self.name, 3),
            "name",
            "Name must be at least 3 characters long.",
        );
        errors.check(
            is_valid_email(&self.email),
            "email",
            "Invalid email address.",
        );
        errors.check(
            !self.current_password.is_empty(),
            "currentPassword",
            "Current password is required.",
        );
        errors.check(
            self.new_password.is_empty() || has_min_chars(&self.new_password, 6),
            "newPassword",
            "New password must be at least 6 characters long.",
        );
        errors.into_result()
    }
}

impl fmt::Debug for UpdateProfileForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateProfileForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}
