//! Authenticated caller identity.

use crate::{auth::JwtClaims, errors::AppError};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Id and email of the caller, taken from claims the auth middleware stored.
///
/// Rejects with 401 when the route is not behind
/// [`jwt_auth_middleware`](crate::auth::jwt_auth_middleware) or the subject is
/// not a UUID.
///
/// ```ignore
/// async fn get_cart(CurrentUser { id, .. }: CurrentUser) -> String {
///     id.to_string()
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<JwtClaims>().ok_or_else(|| {
            AppError::Unauthorized("authentication required".to_string()).into_response()
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
            AppError::Unauthorized("invalid or expired token".to_string()).into_response()
        })?;

        Ok(CurrentUser {
            id,
            email: claims.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenType;
    use axum::http::{Request, StatusCode};

    fn claims(sub: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "a@b.c".to_string(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
            typ: TokenType::Access,
        }
    }

    async fn extract(claims: Option<JwtClaims>) -> Result<CurrentUser, Response> {
        let mut request = Request::builder().body(()).unwrap();
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        let (mut parts, _) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_current_user_from_claims() {
        let id = Uuid::now_v7();
        let user = extract(Some(claims(&id.to_string()))).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@b.c");
    }

    #[tokio::test]
    async fn test_current_user_without_claims() {
        let rejection = extract(None).await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_current_user_with_non_uuid_subject() {
        let rejection = extract(Some(claims("user-42"))).await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }
}
