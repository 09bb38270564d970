use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetimes in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604_800; // 7 days

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("invalid or expired token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("expected a {expected} token")]
    WrongTokenType { expected: TokenType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // user id
    pub email: String, // user email
    pub exp: i64,
    pub iat: i64,
    pub jti: String, // unique per token
    pub typ: TokenType,
}

/// Access and refresh token issued together on login or refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT auth initialized"
        );
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    pub fn create_access_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        self.create_token(user_id, email, TokenType::Access, self.access_ttl_secs)
    }

    pub fn create_refresh_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        self.create_token(user_id, email, TokenType::Refresh, self.refresh_ttl_secs)
    }

    pub fn create_token_pair(&self, user_id: &str, email: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.create_access_token(user_id, email)?,
            refresh_token: self.create_refresh_token(user_id, email)?,
        })
    }

    fn create_token(
        &self,
        user_id: &str,
        email: &str,
        typ: TokenType,
        ttl_seconds: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Verify signature and expiry, whatever the token type
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.verify_typed(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.verify_typed(token, TokenType::Refresh)
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> Result<JwtClaims, AuthError> {
        let claims = self.verify_token(token)?;
        if claims.typ != expected {
            return Err(AuthError::WrongTokenType { expected });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256").unwrap())
    }

    #[test]
    fn test_access_token_round_trip() {
        let auth = auth();
        let token = auth.create_access_token("user-1", "a@b.c").unwrap();

        let claims = auth.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@b.c");
        assert_eq!(claims.typ, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let auth = auth();
        let pair = auth.create_token_pair("user-1", "a@b.c").unwrap();

        assert!(auth.verify_refresh_token(&pair.refresh_token).is_ok());
        assert!(matches!(
            auth.verify_access_token(&pair.refresh_token),
            Err(AuthError::WrongTokenType {
                expected: TokenType::Access
            })
        ));
        assert!(auth.verify_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_tokens_have_unique_ids() {
        let auth = auth();
        let a = auth.verify_token(&auth.create_access_token("u", "e").unwrap()).unwrap();
        let b = auth.verify_token(&auth.create_access_token("u", "e").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = auth();
        // beyond the default 60s leeway
        let token = auth
            .create_token("user-1", "a@b.c", TokenType::Access, -300)
            .unwrap();
        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other =
            JwtAuth::new(&JwtConfig::new("another-secret-that-is-also-long-enough").unwrap());
        let token = other.create_access_token("user-1", "a@b.c").unwrap();
        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(auth().verify_token("not.a.jwt").is_err());
    }
}
