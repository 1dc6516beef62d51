use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Encoder/decoder for signed, time-bound bearer tokens.
///
/// Tokens are stateless: issuing one writes nothing, validating one reads
/// nothing beyond the token itself.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new token codec with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `algorithm` - HMAC algorithm to sign with (HS256/HS384/HS512)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed in the `sub` claim
    /// * `lifetime` - Duration until the token expires
    ///
    /// # Returns
    /// Encoded token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, lifetime);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and extract its subject.
    ///
    /// Signature authenticity is checked before any claim is trusted, then
    /// expiration against the current time (no leeway). Every failure mode
    /// collapses into [`TokenError::Invalid`] so a caller cannot probe
    /// whether a token is expired rather than forged; the cause is logged
    /// at debug level only.
    ///
    /// # Arguments
    /// * `token` - Token string to validate
    ///
    /// # Returns
    /// The `sub` claim of a valid token
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed, forged, incomplete, or expired
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(cause = %e, "Token validation failed");
            TokenError::Invalid
        })?;

        Ok(token_data.claims.sub)
    }
}
