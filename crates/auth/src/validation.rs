//! Credential validation rules shared by the signup and login forms.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::credentials::{Credentials, Field, FlowMode};

/// Whole string must look like `local@domain.tld` with no whitespace anywhere.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const PHONE_DIGITS: usize = 10;

/// Per-field error messages. Empty means the credentials are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for one field and leave every other entry alone.
    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check every field that applies to `mode` and collect one message per failing field.
pub fn validate(credentials: &Credentials, mode: FlowMode) -> FieldErrors {
    mode.fields()
        .iter()
        .filter_map(|&field| {
            validate_field(credentials, field).map(|message| (field, message.to_string()))
        })
        .collect()
}

fn validate_field(credentials: &Credentials, field: Field) -> Option<&'static str> {
    match field {
        Field::Name => {
            if credentials.name.trim().is_empty() {
                return Some("Name is required");
            }
        }
        Field::Email => {
            if credentials.email.is_empty() {
                return Some("Email is required");
            }
            if !is_valid_email(&credentials.email) {
                return Some("Email is invalid");
            }
        }
        Field::Phone => {
            if credentials.phone.is_empty() {
                return Some("Phone is required");
            }
            if phone_digits(&credentials.phone).len() != PHONE_DIGITS {
                return Some("Phone must be 10 digits");
            }
        }
        Field::Password => {
            if credentials.password.is_empty() {
                return Some("Password is required");
            }
            if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
                return Some("Password must be at least 6 characters");
            }
        }
        Field::ConfirmPassword => {
            if credentials.confirm_password != credentials.password {
                return Some("Passwords do not match");
            }
        }
    }

    None
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Keep only the ASCII digits of a phone number.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> Credentials {
        Credentials {
            name: "Ayushman".to_string(),
            email: "ayushman@urbanroot.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn empty_login_reports_both_required_messages() {
        let errors = validate(&Credentials::login("", ""), FlowMode::Login);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn email_without_tld_is_invalid() {
        let errors = validate(&Credentials::login("a@b", "123456"), FlowMode::Login);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
    }

    #[test]
    fn email_with_embedded_whitespace_is_invalid() {
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("john@example.com "));
        assert!(is_valid_email("john.doe+farm@example.co.uk"));
    }

    #[test]
    fn nine_digit_phone_is_rejected() {
        let mut credentials = valid_signup();
        credentials.phone = "(555) 123-456".to_string();

        let errors = validate(&credentials, FlowMode::Signup);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Phone), Some("Phone must be 10 digits"));
    }

    #[test]
    fn formatted_ten_digit_phone_is_accepted() {
        let errors = validate(&valid_signup(), FlowMode::Signup);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn whitespace_name_is_required() {
        let mut credentials = valid_signup();
        credentials.name = "   ".to_string();

        let errors = validate(&credentials, FlowMode::Signup);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn short_password_still_checks_confirmation() {
        let mut credentials = valid_signup();
        credentials.password = "abc".to_string();
        credentials.confirm_password = "abd".to_string();

        let errors = validate(&credentials, FlowMode::Signup);

        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        let credentials = Credentials::login("a@b.co", "ñññññ");
        let errors = validate(&credentials, FlowMode::Login);
        assert!(errors.contains(Field::Password));
    }

    #[test]
    fn login_ignores_signup_only_fields() {
        let errors = validate(&Credentials::login("a@b.co", "123456"), FlowMode::Login);
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_signup_reports_every_field() {
        let errors = validate(&Credentials::default(), FlowMode::Signup);

        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Phone), Some("Phone is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        // Both passwords are empty, so they match.
        assert!(!errors.contains(Field::ConfirmPassword));
    }

    #[test]
    fn validation_is_deterministic() {
        let credentials = Credentials::login("bad", "");
        assert_eq!(
            validate(&credentials, FlowMode::Login),
            validate(&credentials, FlowMode::Login)
        );
    }

    #[test]
    fn clearing_one_field_keeps_the_rest() {
        let mut errors = validate(&Credentials::login("", ""), FlowMode::Login);
        errors.clear(Field::Email);

        assert!(!errors.contains(Field::Email));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
    }

    #[test]
    fn phone_digits_strips_formatting() {
        assert_eq!(phone_digits("+1 (555) 000-0000"), "15550000000");
    }
}
