//! Sign-in boundary.
//!
//! The hosted identity service is reached through [`AuthService`]; this crate
//! only decides which email to sign in with and what role came back.

pub mod error;

pub use error::AuthError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tracing::info;

/// Synthetic domain for barista accounts created from a plain username.
pub const BARISTA_EMAIL_DOMAIN: &str = "maukoffie.barista";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Barista,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Barista => write!(f, "barista"),
        }
    }
}

#[async_trait]
pub trait AuthService: Send + Sync + 'static {
    /// Signs in and resolves the account's role.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Role, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Turns login input into an email: full addresses pass through, plain
/// usernames get [`BARISTA_EMAIL_DOMAIN`].
pub fn login_email(input: &str) -> String {
    let input = input.trim();
    if input.contains('@') {
        input.to_string()
    } else {
        format!("{input}@{BARISTA_EMAIL_DOMAIN}")
    }
}

/// Signs in with username-or-email input.
pub async fn sign_in(service: &dyn AuthService, login: &str, password: &str) -> Result<Role, AuthError> {
    let email = login_email(login);
    let role = service.sign_in(&email, password).await?;
    info!(%email, %role, "Signed in");
    Ok(role)
}
