use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Uniform validation failure.
    ///
    /// Malformed tokens, bad signatures, missing claims, and expired tokens
    /// all collapse into this variant. The caller cannot tell them apart;
    /// the underlying cause is only logged inside the codec.
    #[error("Token is invalid")]
    Invalid,
}
