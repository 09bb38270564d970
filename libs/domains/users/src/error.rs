use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, AuthError};
use database::DatabaseError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Address not found: {0}")]
    AddressNotFound(Uuid),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateEmail(email) => {
                AppError::BadRequest(format!("User with email '{}' already exists", email))
            }
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::InvalidRefreshToken => {
                AppError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            UserError::AddressNotFound(id) => {
                AppError::NotFound(format!("Address {} not found", id))
            }
            UserError::UpdateFailed(msg) => AppError::InternalServerError(msg),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Token(e) => AppError::InternalServerError(e.to_string()),
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(DatabaseError::Mongo(err))
    }
}

impl From<mongodb::bson::ser::Error> for UserError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        UserError::Database(DatabaseError::Generic(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let id = Uuid::nil();
        let cases = [
            (UserError::NotFound(id), StatusCode::NOT_FOUND),
            (
                UserError::DuplicateEmail("a@b.io".into()),
                StatusCode::BAD_REQUEST,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::InvalidRefreshToken, StatusCode::UNAUTHORIZED),
            (UserError::AddressNotFound(id), StatusCode::NOT_FOUND),
            (
                UserError::UpdateFailed("cart".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::PasswordHash("salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Database(DatabaseError::Generic("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        let AppError::Unauthorized(msg) = AppError::from(UserError::InvalidCredentials) else {
            panic!("expected Unauthorized");
        };
        assert_eq!(msg, "Invalid email or password");
    }
}
