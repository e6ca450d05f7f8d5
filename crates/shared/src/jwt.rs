//! JWT token validation using RS256 algorithm.
//!
//! Access tokens are minted by the identity service; this module only
//! verifies them. Claims carry the subject user ID and a `role_level`
//! (1-10) used for data scoping.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier for revocation)
    pub jti: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Role level of the subject, 1-10. Level 10 grants unrestricted
    /// reporting access; lower levels see only rows they own.
    #[serde(default = "default_role_level")]
    pub role_level: i16,
}

fn default_role_level() -> i16 {
    1
}

/// Type of JWT token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifies access tokens against the identity service's public key.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtValidator")
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtValidator {
    /// Creates a validator from an RSA public key in PEM format.
    pub fn from_rsa_pem(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            leeway_secs,
        })
    }

    /// Creates a validator with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        // Allows for minor clock differences between the identity service
        // and this host.
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }

    /// Returns the algorithm used by this validator.
    /// Tests use HS256, production uses RS256.
    fn algorithm(&self) -> Algorithm {
        #[cfg(test)]
        {
            Algorithm::HS256
        }
        #[cfg(not(test))]
        {
            Algorithm::RS256
        }
    }
}

/// Extracts user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_12345";

    fn sign_token(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn test_claims(user_id: Uuid, role_level: i16, token_type: TokenType) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(900)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
            role_level,
        }
    }

    #[test]
    fn test_validate_access_token() {
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let user_id = Uuid::new_v4();
        let claims = test_claims(user_id, 5, TokenType::Access);

        let token = sign_token(&claims);
        let validated = validator.validate_access_token(&token).unwrap();

        assert_eq!(validated.sub, user_id.to_string());
        assert_eq!(validated.jti, claims.jti);
        assert_eq!(validated.role_level, 5);
        assert_eq!(validated.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let claims = test_claims(Uuid::new_v4(), 10, TokenType::Refresh);

        let token = sign_token(&claims);
        let result = validator.validate_access_token(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (now - Duration::seconds(120)).timestamp(),
            iat: (now - Duration::seconds(1020)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
            role_level: 1,
        };

        let token = sign_token(&claims);
        let result = validator.validate_access_token(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let claims = test_claims(Uuid::new_v4(), 1, TokenType::Access);

        let mut token = sign_token(&claims);
        token.push('x');
        assert!(validator.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_role_level_defaults_to_one() {
        // Tokens minted before the role_level claim was added omit it.
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let now = Utc::now();
        let raw = serde_json::json!({
            "sub": Uuid::new_v4().to_string(),
            "exp": (now + Duration::seconds(900)).timestamp(),
            "iat": now.timestamp(),
            "jti": Uuid::new_v4().to_string(),
            "token_type": "access",
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &raw,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let claims = validator.validate_access_token(&token).unwrap();
        assert_eq!(claims.role_level, 1);
    }

    #[test]
    fn test_extract_user_id() {
        let user_id = Uuid::new_v4();
        let claims = test_claims(user_id, 1, TokenType::Access);
        assert_eq!(extract_user_id(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_extract_user_id_invalid() {
        let mut claims = test_claims(Uuid::new_v4(), 1, TokenType::Access);
        claims.sub = "not-a-uuid".to_string();
        assert!(matches!(
            extract_user_id(&claims),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_validator_debug_redacts_key() {
        let validator = JwtValidator::new_for_testing(TEST_SECRET);
        let debug = format!("{:?}", validator);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(TEST_SECRET));
    }
}
