//! Login and registration forms.

use std::fmt;

use serde::Serialize;

use super::{Validate, ValidationErrors, has_min_chars, is_valid_email};

/// Email and password for `POST /auth/login`.
///
/// The password is never exposed in Debug output.
#[derive(Clone, Serialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            is_valid_email(&self.email),
            "email",
            "Please enter a valid email address.",
        );
        errors.check(!self.password.is_empty(), "password", "Password is required.");
        errors.into_result()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Name, email and password for `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The login form for the freshly registered account.
    pub fn to_login(&self) -> LoginForm {
        LoginForm::new(&self.email, &self.password)
    }
}

impl Validate for RegisterForm {
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
            "Please enter a valid email address.",
        );
        errors.check(
            has_min_chars(&self.password, 6),
            "password",
            "Password must be at least 6 characters long.",
        );
        errors.into_result()
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
