use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use domain_users::UserError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Cart is empty")]
    CartEmpty,

    /// The cart update failed or matched no user
    #[error("Cart update failed: {0}")]
    UpdateFailed(String),

    #[error("Cannot act on another user's cart")]
    Forbidden,

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    User(#[from] UserError),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CartError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            CartError::CartEmpty => AppError::NotFound("Cart is empty".to_string()),
            CartError::UpdateFailed(msg) => AppError::InternalServerError(msg),
            CartError::Forbidden => {
                AppError::Forbidden("Cannot act on another user's cart".to_string())
            }
            CartError::NotImplemented(what) => {
                AppError::NotImplemented(format!("{} is not implemented", what))
            }
            CartError::Product(e) => e.into(),
            CartError::User(e) => e.into(),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use database::DatabaseError;

    #[test]
    fn test_status_mapping() {
        let id = Uuid::nil();
        let cases = [
            (CartError::ProductNotFound(id), StatusCode::NOT_FOUND),
            (CartError::UserNotFound(id), StatusCode::NOT_FOUND),
            (CartError::CartEmpty, StatusCode::NOT_FOUND),
            (
                CartError::UpdateFailed("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (CartError::Forbidden, StatusCode::FORBIDDEN),
            (
                CartError::NotImplemented("checkout"),
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                CartError::Product(ProductError::Database(DatabaseError::Generic("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }
}
