use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials for {0}")]
    InvalidCredentials(String),

    /// Signed in, but the account carries no known role.
    #[error("No role assigned to {0}")]
    NoRole(String),

    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}
