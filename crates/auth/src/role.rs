//! Roles and the fixed demo accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role granted once a flow completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// A demo login advertised on the login form. Not a security mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const DEMO_USER: DemoAccount = DemoAccount {
    email: "user@urbanroot.com",
    password: "password123",
    role: Role::User,
};

pub const DEMO_ADMIN: DemoAccount = DemoAccount {
    email: "admin@urbanroot.com",
    password: "admin123",
    role: Role::Admin,
};

pub const DEMO_ACCOUNTS: &[DemoAccount] = &[DEMO_USER, DEMO_ADMIN];

/// Only the exact admin pair yields [`Role::Admin`]; everything else is a user.
pub fn resolve_role(email: &str, password: &str) -> Role {
    if email == DEMO_ADMIN.email && password == DEMO_ADMIN.password {
        Role::Admin
    } else {
        Role::User
    }
}

/// Who finished the flow. Ephemeral: the Shell owns any session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,
    pub email: String,
}

impl Identity {
    pub fn new(role: Role, email: impl Into<String>) -> Self {
        Self {
            role,
            email: email.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Page the Shell opens after completion.
    pub fn landing_page(&self) -> &'static str {
        match self.role {
            Role::Admin => "admin",
            Role::User => "dashboard",
        }
    }
}
