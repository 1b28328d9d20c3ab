//! Raw credential fields collected by the signup and login forms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which form the credentials belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    Signup,
    Login,
}

impl FlowMode {
    /// Fields that are validated for this mode, in form order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            FlowMode::Signup => &[
                Field::Name,
                Field::Email,
                Field::Phone,
                Field::Password,
                Field::ConfirmPassword,
            ],
            FlowMode::Login => &[Field::Email, Field::Password],
        }
    }

    pub fn applies_to(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowMode::Signup => f.write_str("signup"),
            FlowMode::Login => f.write_str("login"),
        }
    }
}

/// A single input on the credential forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Human label used by the Shell when prompting.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email",
            Field::Phone => "Phone Number",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    /// Whether the Shell should mask the input.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values typed into the forms. Login only reads `email` and `password`.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl Credentials {
    /// Login credentials with only the two fields the login form has.
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }
}

// Passwords stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_covers_all_fields_and_login_only_two() {
        assert_eq!(FlowMode::Signup.fields().len(), 5);
        assert_eq!(FlowMode::Login.fields(), &[Field::Email, Field::Password]);
        assert!(!FlowMode::Login.applies_to(Field::Phone));
    }

    #[test]
    fn set_and_get_round_through_the_same_slot() {
        let mut credentials = Credentials::default();
        credentials.set(Field::ConfirmPassword, "secret1");
        assert_eq!(credentials.get(Field::ConfirmPassword), "secret1");
        assert_eq!(credentials.get(Field::Password), "");
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let credentials = Credentials::login("user@urbanroot.com", "password123");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("user@urbanroot.com"));
        assert!(!rendered.contains("password123"));
    }

    #[test]
    fn field_wire_names_match_form_ids() {
        assert_eq!(Field::ConfirmPassword.as_str(), "confirmPassword");
        assert_eq!(
            serde_json::to_string(&Field::ConfirmPassword).unwrap(),
            "\"confirmPassword\""
        );
    }
}
