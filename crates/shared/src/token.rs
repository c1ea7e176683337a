//! Signed access/refresh tokens for the login endpoint.
//!
//! Tokens are HS256-signed with a configured secret. The service both issues
//! and validates them, so a shared secret is sufficient; no second party
//! ever needs to verify a token independently.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}

/// Kind of token a claim set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff id.
    pub sub: String,
    /// Staff role at issue time.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id.
    pub jti: String,
    pub kind: TokenKind,
}

/// An access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Issues and validates HS256 tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_expiry_secs", &self.access_expiry_secs)
            .field("refresh_expiry_secs", &self.refresh_expiry_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: &str, access_expiry_secs: i64, refresh_expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    /// Issues an access/refresh pair for the given staff member.
    pub fn issue_pair(&self, staff_id: i64, role: &str) -> Result<TokenPair, TokenError> {
        let access = self.sign(staff_id, role, TokenKind::Access, self.access_expiry_secs)?;
        let refresh = self.sign(staff_id, role, TokenKind::Refresh, self.refresh_expiry_secs)?;
        Ok(TokenPair {
            access_token: access,
            refresh_token: refresh,
            expires_in: self.access_expiry_secs,
        })
    }

    fn sign(
        &self,
        staff_id: i64,
        role: &str,
        kind: TokenKind,
        expiry_secs: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: staff_id.to_string(),
            role: role.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validates a token of the expected kind and returns its claims.
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        if data.claims.kind != expected {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("unit-test-secret", 3600, 86400)
    }

    #[test]
    fn test_issue_pair_shapes() {
        let pair = signer().issue_pair(7, "admin").unwrap();
        assert_eq!(pair.expires_in, 3600);
        assert!(pair.access_token.contains('.'));
        assert!(pair.refresh_token.contains('.'));
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_access_token_claims() {
        let s = signer();
        let pair = s.issue_pair(42, "staff").unwrap();
        let claims = s.validate(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let s = signer();
        let pair = s.issue_pair(1, "staff").unwrap();
        assert!(matches!(
            s.validate(&pair.access_token, TokenKind::Refresh),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            s.validate(&pair.refresh_token, TokenKind::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = signer().issue_pair(1, "staff").unwrap();
        let other = TokenSigner::new("a-different-secret", 3600, 86400);
        assert!(matches!(
            other.validate(&pair.access_token, TokenKind::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(signer().validate("not.a.token", TokenKind::Access).is_err());
        assert!(signer().validate("", TokenKind::Access).is_err());
    }

    #[test]
    fn test_unique_jti() {
        let s = signer();
        let a = s.issue_pair(1, "staff").unwrap();
        let b = s.issue_pair(1, "staff").unwrap();
        let ja = s.validate(&a.access_token, TokenKind::Access).unwrap().jti;
        let jb = s.validate(&b.access_token, TokenKind::Access).unwrap().jti;
        assert_ne!(ja, jb);
    }
}
