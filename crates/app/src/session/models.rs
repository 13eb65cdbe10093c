//! Session models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

/// Login credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Coarse session phase published on the watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No user; mutating cart and order operations are gated off.
    SignedOut,
    /// A user is present.
    SignedIn,
}

/// Successful authentication payload: the raw bearer token plus the user.
#[derive(Clone)]
pub struct AuthSession {
    /// Raw bearer token; handed to the token cell, never logged.
    pub token: String,
    /// The authenticated user.
    pub user: CurrentUser,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"**redacted**")
            .field("user", &self.user)
            .finish()
    }
}
