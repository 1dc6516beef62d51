use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth_core::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth_core::TokenError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    /// Bad credentials. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token rejected. Uniform regardless of the underlying cause.
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Token subject no longer resolves to a user. Internal only; the HTTP
    /// layer surfaces it as the same rejection as `InvalidToken`.
    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
