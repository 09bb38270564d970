use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{JwtAuth, TokenPair};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, SignUpRequest, User, UserResponse};
use crate::repository::UserRepository;

/// Signup, login and token refresh
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self::from_shared(Arc::new(repository), jwt)
    }

    /// Share an existing repository handle with other services
    pub fn from_shared(repository: Arc<R>, jwt: JwtAuth) -> Self {
        Self { repository, jwt }
    }

    /// Create a user with a hashed password and empty addresses, cart and orders.
    ///
    /// Email uniqueness is enforced by the store, so concurrent signups with
    /// the same address cannot both succeed.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn sign_up(&self, input: SignUpRequest) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(
            normalize_email(&input.email),
            password_hash,
            non_blank(input.first_name),
            non_blank(input.last_name),
        );

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User signed up");
        Ok(created)
    }

    /// Verify credentials and issue a fresh token pair.
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<(UserResponse, TokenPair)> {
        let user = self
            .repository
            .get_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password)? {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let tokens = self.issue_tokens(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((user.into(), tokens))
    }

    /// Exchange a stored refresh token for a new pair. The old one stops working.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> UserResult<TokenPair> {
        let claims = self.jwt.verify_refresh_token(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            UserError::InvalidRefreshToken
        })?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| UserError::InvalidRefreshToken)?;

        let user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(UserError::InvalidRefreshToken)?;

        if !user.refresh_tokens.iter().any(|t| t == refresh_token) {
            tracing::warn!(user_id = %user.id, "Refresh token is not the latest issued");
            return Err(UserError::InvalidRefreshToken);
        }

        self.issue_tokens(&user).await
    }

    async fn issue_tokens(&self, user: &User) -> UserResult<TokenPair> {
        let pair = self
            .jwt
            .create_token_pair(&user.id.to_string(), &user.email)?;

        let stored = self
            .repository
            .update_tokens(user.id, &pair.access_token, &pair.refresh_token)
            .await?;
        if !stored {
            return Err(UserError::NotFound(user.id));
        }

        Ok(pair)
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl<R: UserRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
