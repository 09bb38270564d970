//! Bearer-token authentication.
//!
//! - [`JwtAuth`] issues and verifies HS256 access/refresh tokens
//! - [`jwt_auth_middleware`] guards routes and stores [`JwtClaims`] in request extensions
//! - [`CurrentUser`](crate::extractors::CurrentUser) hands the caller's id to handlers
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/cart/items", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{
    ACCESS_TOKEN_TTL, AuthError, JwtAuth, JwtClaims, REFRESH_TOKEN_TTL, TokenPair, TokenType,
};
pub use middleware::jwt_auth_middleware;
