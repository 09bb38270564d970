//! Users Domain
//!
//! User accounts and everything embedded in the user document.
//!
//! # Features
//!
//! - Signup with Argon2 password hashing and a unique email index
//! - Login issuing access/refresh tokens, refresh-token rotation
//! - Address book (add, edit in place, delete)
//! - Cart storage used by the cart domain
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  auth_handlers │ handlers    │  ← /users/* (public), /address/* (bearer)
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ AuthService │ AddressService │  ← hashing, tokens, not-found mapping
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │        UserRepository        │  ← trait + MongoDB / in-memory implementations
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │            Models            │  ← User, Address, Order, DTOs
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{auth_handlers, AuthService, InMemoryUserRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars")?);
//! let service = AuthService::new(InMemoryUserRepository::new(), jwt);
//! let router = auth_handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod address_service;
pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use address_service::AddressService;
pub use auth_handlers::AuthApiDoc;
pub use crate::mongodb::MongoUserRepository;
pub use error::{UserError, UserResult};
pub use handlers::AddressApiDoc;
pub use models::{
    Address, AddressInput, LoginRequest, LoginResponse, Order, PaymentMode, SignUpRequest,
    User, UserResponse,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
