use std::sync::Arc;

use async_trait::async_trait;
use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserStore;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with an injected store.
/// Password work is CPU-bound by design, so it runs on the blocking pool
/// instead of stalling the async runtime.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_lifetime: Duration,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `signing_secret` - Secret key for token signing
    /// * `algorithm` - Token signing algorithm
    /// * `token_lifetime` - How long issued tokens stay valid
    pub fn new(
        store: Arc<S>,
        signing_secret: &[u8],
        algorithm: Algorithm,
        token_lifetime: Duration,
    ) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(signing_secret, algorithm),
            token_lifetime,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("Hashing task failed: {}", e)))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Unknown(format!("Verification task failed: {}", e)))??;
        Ok(matches)
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        // Fast path only. Two concurrent registrations can both pass this
        // check; the store's unique-email constraint settles the race.
        if let Some(existing) = self.store.find_by_email(command.email.as_str()).await? {
            return Err(AuthError::EmailAlreadyExists(existing.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            active: true,
            created_at: Utc::now(),
            modified_at: None,
        };

        let created_user = self.store.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<Option<User>, AuthError> {
        let user = match self.store.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let matches = self
            .verify_password(credentials.password, user.password_hash.clone())
            .await?;

        if matches {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn login(&self, credentials: Credentials) -> Result<String, AuthError> {
        let user = self
            .authenticate(credentials)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self
            .token_codec
            .issue(user.email.as_str(), self.token_lifetime)?;

        tracing::debug!(user_id = %user.id, "Access token issued");

        Ok(token)
    }

    async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let subject = self
            .token_codec
            .validate(token)
            .map_err(|_| AuthError::InvalidToken)?;

        // Token validity does not imply the user still exists
        self.store
            .find_by_email(&subject)
            .await?
            .ok_or(AuthError::NotFound(subject))
    }
}
