//! Signals the enrollment flow hands to the Shell for display.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::validation::FieldErrors;

/// How the Shell should present a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A verification code went out to the held email.
    CodeSent { email: String, resent: bool },

    /// Login finished with the resolved role.
    LoginSucceeded { role: Role },

    /// Signup code was accepted and the account exists.
    SignupCompleted,

    /// Details were rejected; the map is also held on the session.
    ValidationFailed { errors: FieldErrors },

    /// The verification code did not have six characters.
    CodeInvalid,

    /// The dispatched call failed and the session went back to where it was.
    TransportFailed { reason: String },
}

impl Notification {
    pub fn severity(&self) -> Severity {
        match self {
            Notification::CodeSent { .. }
            | Notification::LoginSucceeded { .. }
            | Notification::SignupCompleted => Severity::Success,
            Notification::ValidationFailed { .. }
            | Notification::CodeInvalid
            | Notification::TransportFailed { .. } => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Toast text for the notification.
    pub fn message(&self) -> String {
        match self {
            Notification::CodeSent { resent: true, .. } => "OTP resent successfully!".to_string(),
            Notification::CodeSent { resent: false, .. } => {
                "OTP sent to your email and phone!".to_string()
            }
            Notification::LoginSucceeded { role: Role::Admin } => {
                "Welcome back, Admin!".to_string()
            }
            Notification::LoginSucceeded { role: Role::User } => {
                "Login successful! Welcome back.".to_string()
            }
            Notification::SignupCompleted => "Account created successfully!".to_string(),
            Notification::ValidationFailed { .. } => {
                "Please fix the highlighted fields".to_string()
            }
            Notification::CodeInvalid => "Please enter a valid 6-digit OTP".to_string(),
            Notification::TransportFailed { reason } => format!("Something went wrong: {reason}"),
        }
    }
}
