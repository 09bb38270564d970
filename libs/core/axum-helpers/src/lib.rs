//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services.
//!
//! - **[`auth`]**: HS256 access/refresh tokens and the bearer-token gate
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: `AppError` and the JSON `ErrorResponse` body
//! - **[`extractors`]**: `UuidPath`, `ValidatedJson`, `ValidatedQuery`, `CurrentUser`
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new(), &environment)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AuthError, JwtAuth, JwtClaims, JwtConfig, REFRESH_TOKEN_TTL, TokenPair,
    TokenType, jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{CurrentUser, UuidPath, ValidatedJson, ValidatedQuery};
