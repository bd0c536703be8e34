//! Bearer-token issuance and verification.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roster_database::{UserError, UserResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Tokens are valid for exactly one hour after issuance.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: usize,
    /// Expiration time
    pub exp: usize,
}

/// Signs and verifies bearer tokens for a process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Create an issuer from the signing secret.
    ///
    /// Refuses an absent or empty secret: signing with a default key
    /// would make every token forgeable.
    pub fn new(secret: &str) -> UserResult<Self> {
        if secret.trim().is_empty() {
            return Err(UserError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        })
    }

    /// Issue a signed token carrying the user identifier.
    pub fn issue(&self, user_id: &str) -> UserResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| UserError::TokenCreationFailed("system time error".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: (now + TOKEN_TTL).as_secs() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| UserError::TokenCreationFailed(e.to_string()))
    }

    /// Validate a token and return the user identifier it carries.
    ///
    /// Expired and tampered tokens map to distinct error kinds here,
    /// but callers at the HTTP boundary must not let a client tell
    /// them apart.
    pub fn verify(&self, token: &str) -> UserResult<String> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        // Expiry is absolute; no clock leeway.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|err| {
            match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => UserError::TokenExpired,
                _ => UserError::InvalidToken,
            }
        })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_that_is_long_enough_for_hs256";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TEST_SECRET).unwrap()
    }

    #[test]
    fn test_issue_then_verify_returns_user_id() {
        let issuer = issuer();

        let token = issuer.issue("64f0c3e2a1b2c3d4e5f60718").unwrap();
        assert!(!token.is_empty());

        let user_id = issuer.verify(&token).unwrap();
        assert_eq!(user_id, "64f0c3e2a1b2c3d4e5f60718");
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(matches!(TokenIssuer::new(""), Err(UserError::MissingSecret)));
        assert!(matches!(
            TokenIssuer::new("   "),
            Err(UserError::MissingSecret)
        ));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let issuer = issuer();
        let token = issuer.issue("123").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');

        assert!(matches!(
            issuer.verify(&tampered),
            Err(UserError::InvalidToken)
        ));
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(UserError::InvalidToken)
        ));
    }

    #[test]
    fn test_foreign_key_token_is_invalid() {
        let other = TokenIssuer::new("a_completely_different_signing_secret").unwrap();
        let token = other.issue("123").unwrap();

        assert!(matches!(
            issuer().verify(&token),
            Err(UserError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize;

        let claims = Claims {
            sub: "123".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .unwrap();

        assert!(matches!(
            issuer().verify(&token),
            Err(UserError::TokenExpired)
        ));
    }
}
