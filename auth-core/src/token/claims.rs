use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by issued bearer tokens.
///
/// All fields are mandatory; a token missing any of them fails validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Build claims for a subject expiring `lifetime` from now.
    pub fn for_subject(subject: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice@example.com", Duration::minutes(30));

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_negative_lifetime_is_already_expired() {
        let claims = Claims::for_subject("alice@example.com", Duration::seconds(-10));
        assert!(claims.exp < claims.iat);
    }
}
