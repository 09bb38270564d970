//! API routes module

pub mod address;
pub mod cart;
pub mod health;
pub mod users;

use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;

use crate::state::AppState;

/// Create all API routes
///
/// `/users` is public; `/cart` and `/address` require a bearer access token.
pub fn routes(state: &AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.jwt.clone(), jwt_auth_middleware);

    Router::new()
        .nest("/users", users::router(state))
        .nest("/cart", cart::router(state).route_layer(auth.clone()))
        .nest("/address", address::router(state).route_layer(auth))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::JwtConfig;
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::Client;
    use tower::ServiceExt;

    const UNREACHABLE: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

    async fn test_state() -> AppState {
        let config = Config {
            app: app_info!(),
            mongodb: MongoConfig::with_database(UNREACHABLE, "shop_test"),
            server: ServerConfig::new("127.0.0.1".to_string(), 0),
            jwt: JwtConfig::new("routes-test-secret-with-32-chars!!").unwrap(),
            environment: Environment::Development,
        };
        // Client construction is lazy; nothing connects until a query runs.
        let client = Client::with_uri_str(UNREACHABLE).await.unwrap();
        AppState::new(config, client)
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_cart_routes_require_token() {
        let state = test_state().await;
        for (method, uri) in [
            ("POST", "/cart/add?product_id=0190f7a0-0000-7000-8000-000000000001"),
            ("DELETE", "/cart/remove?product_id=0190f7a0-0000-7000-8000-000000000001"),
            ("GET", "/cart/items"),
            ("POST", "/cart/buy"),
        ] {
            let (status, _) = send(routes(&state), method, uri).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_address_routes_require_token() {
        let state = test_state().await;
        let (status, _) = send(
            routes(&state),
            "DELETE",
            "/address/0190f7a0-0000-7000-8000-000000000001",
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_without_query_is_rejected_before_database() {
        let state = test_state().await;
        let (status, body) = send(routes(&state), "GET", "/users/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_database() {
        let state = test_state().await;
        let (status, body) = send(health::router(state), "GET", "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["mongodb"], "disconnected");
        assert_eq!(body["status"], "not ready");
    }
}
