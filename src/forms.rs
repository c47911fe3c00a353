//! Sign-up form validation with localized error messages.

use crate::i18n::MessageMapping;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Minimum password length accepted by the sign-up form.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"))
}

/// Submitted sign-up form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Localized error message per invalid field, keyed by form field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Localized labels for rendering the sign-up form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignUpFormLabels {
    pub heading: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_requirements: String,
    pub confirm_password: String,
    pub submit: String,
    pub already_have_account: String,
    pub sign_in: String,
}

impl SignUpFormLabels {
    pub fn new(messages: &MessageMapping) -> Self {
        let t = messages.translator();
        let form_t = messages.namespaced("forms");
        Self {
            heading: t.t("auth.signUp"),
            first_name: form_t.t("firstName"),
            last_name: form_t.t("lastName"),
            email: form_t.t("email"),
            password: t.t("auth.password"),
            password_requirements: t.t("auth.passwordRequirements"),
            confirm_password: t.t("auth.confirmPassword"),
            submit: t.t("auth.signUp"),
            already_have_account: t.t("auth.alreadyHaveAccount"),
            sign_in: t.t("auth.signIn"),
        }
    }
}

impl SignUpForm {
    /// Validate the form.
    ///
    /// Names and email are trimmed before the required check; passwords are
    /// checked as submitted.
    ///
    /// # Errors
    /// Returns every invalid field with its localized message.
    pub fn validate(&self, messages: &MessageMapping) -> Result<(), FieldErrors> {
        let t = messages.translator();
        let form_t = messages.namespaced("forms");
        let error_t = messages.namespaced("errors");
        let required = |label: String| error_t.t_with("required", &[("field", label.as_str())]);

        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", required(form_t.t("firstName")));
        }

        if self.last_name.trim().is_empty() {
            errors.insert("last_name", required(form_t.t("lastName")));
        }

        if self.email.trim().is_empty() {
            errors.insert("email", required(form_t.t("email")));
        } else if !email_regex().is_match(&self.email) {
            errors.insert("email", error_t.t("invalidEmail"));
        }

        if self.password.is_empty() {
            errors.insert("password", required(form_t.t("password")));
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            let field = form_t.t("password");
            let length = MIN_PASSWORD_LENGTH.to_string();
            errors.insert(
                "password",
                error_t.t_with("minLength", &[("field", field.as_str()), ("length", length.as_str())]),
            );
        }

        if self.confirm_password.is_empty() {
            errors.insert("confirm_password", required(t.t("auth.confirmPassword")));
        } else if self.password != self.confirm_password {
            errors.insert("confirm_password", error_t.t("passwordMismatch"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
