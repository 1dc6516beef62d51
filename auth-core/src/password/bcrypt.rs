use bcrypt::DEFAULT_COST;

use super::errors::PasswordError;

/// bcrypt reads at most this many input bytes.
const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses bcrypt with a
/// fresh random salt per hash).
///
/// Plaintext is truncated byte-level at 72 bytes before both hashing and
/// verification, so the two operations always agree on inputs longer than
/// the bcrypt limit. Truncation is on bytes, not characters, to avoid
/// multi-byte encoding ambiguity.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the default bcrypt cost.
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit bcrypt cost factor.
    ///
    /// Lower costs are useful in tests; production code should stick with
    /// [`PasswordHasher::new`].
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular-crypt format hash string (includes algorithm, cost, and salt)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(truncate(password), self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Applies the same 72-byte truncation as [`PasswordHasher::hash`].
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(truncate(password), hash)
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}
