use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

#[derive(Debug, PartialEq, Eq)]
enum BearerError {
    Missing,
    Malformed,
}

/// Token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(BearerError::Malformed);
    }
    Ok(token)
}

/// Authentication gate for protected routes.
///
/// Rejects with 401 when the header is missing, is not a bearer token, or the
/// token fails verification (bad signature, expired, or a refresh token).
/// On success the [`JwtClaims`](super::JwtClaims) are inserted into request
/// extensions for [`CurrentUser`](crate::extractors::CurrentUser).
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/cart/items", get(get_cart))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(request.headers()) {
        Ok(token) => token,
        Err(BearerError::Missing) => {
            tracing::debug!("No Authorization header");
            return Err(unauthorized("authorization header missing"));
        }
        Err(BearerError::Malformed) => {
            tracing::debug!("Authorization header is not a bearer token");
            return Err(unauthorized("invalid authorization format"));
        }
    };

    let claims = match auth.verify_access_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(unauthorized("invalid or expired token"));
        }
    };

    tracing::trace!(user_id = %claims.sub, "Authenticated request");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn unauthorized(message: &str) -> Response {
    AppError::Unauthorized(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{
        Extension, Router,
        body::Body,
        http::{HeaderValue, Request as HttpRequest, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-secret-long-enough-for-tests").unwrap())
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/protected",
                get(|Extension(claims): Extension<JwtClaims>| async move { claims.sub }),
            )
            .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    async fn call(auth: JwtAuth, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app(auth)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::Missing));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::Malformed));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), Err(BearerError::Malformed));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer tok"));
        assert_eq!(extract_bearer_token(&headers), Ok("tok"));
    }

    #[tokio::test]
    async fn test_valid_access_token_passes_claims() {
        let auth = auth();
        let token = auth.create_access_token("user-42", "a@b.c").unwrap();

        let (status, body) = call(auth, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "user-42");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = call(auth(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("authorization header missing"));
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        let (status, body) = call(auth(), Some("Token abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("invalid authorization format"));
    }

    #[tokio::test]
    async fn test_refresh_token_rejected() {
        let auth = auth();
        let token = auth.create_refresh_token("user-42", "a@b.c").unwrap();

        let (status, body) = call(auth, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("invalid or expired token"));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let (status, _) = call(auth(), Some("Bearer garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
