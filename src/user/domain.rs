//! Core user domain types.

use std::fmt::{Debug, Display};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A user's credential.
///
/// The credential is opaque: it is stored and compared verbatim. It is never
/// serialized and its [Debug] output is redacted so it cannot end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a credential string.
    pub fn new(password: &str) -> Self {
        Self(password.to_owned())
    }

    /// Whether `candidate` is exactly this credential.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(********)")
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The unique name the user registered with.
    pub username: String,
    /// The unique email address the user logs in with.
    pub email: String,
    /// The user's credential.
    #[serde(skip_serializing)]
    pub password: Password,
    /// The user's current spendable funds.
    ///
    /// Recording an expense debits the balance, so it can become negative.
    pub balance: Decimal,
    /// The amount the user aims to save, reported as the goal in monthly summaries.
    pub saving: Decimal,
}

/// The details needed to insert a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The unique name of the user.
    pub username: String,
    /// The unique email address of the user.
    pub email: String,
    /// The user's credential.
    pub password: Password,
}
