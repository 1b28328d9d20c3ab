//! The verification code typed on the signup code step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters a verification code must have before it can be submitted.
pub const CODE_LENGTH: usize = 6;

/// The one-time code typed into the verification step.
///
/// Only the length is checked; the characters themselves are not.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_submittable(&self) -> bool {
        self.len() == CODE_LENGTH
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<&str> for VerificationCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationCode({} chars)", self.len())
    }
}
