use async_trait::async_trait;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with hashed credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command with names, email, and plaintext password
    ///
    /// # Returns
    /// Persisted user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials against the stored hash.
    ///
    /// Unknown email and wrong password both yield `Ok(None)` so callers
    /// cannot tell which factor failed.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// The matching user, or None on any credential mismatch
    ///
    /// # Errors
    /// * `Password` - Stored hash could not be processed
    /// * `DatabaseError` - Storage operation failed
    async fn authenticate(&self, credentials: Credentials) -> Result<Option<User>, AuthError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// Signed access token with subject = the user's email
    ///
    /// # Errors
    /// * `InvalidCredentials` - Credentials did not match (collapsed)
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, credentials: Credentials) -> Result<String, AuthError>;

    /// Resolve a bearer token to its user.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token string from the authorization header
    ///
    /// # Returns
    /// The user named by the token subject
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged, or expired
    /// * `NotFound` - Subject no longer resolves to a user
    /// * `DatabaseError` - Storage operation failed
    async fn current_user(&self, token: &str) -> Result<User, AuthError>;
}

/// Persistence operations for the user aggregate.
///
/// Implementations own their concurrency discipline; `create` must be
/// atomic with respect to the unique-email constraint, which is the real
/// guarantee against concurrent duplicate registrations.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string (matched case-sensitively)
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}
