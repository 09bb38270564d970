//! Cart Domain
//!
//! The cart is the `cart` array of product ids inside the user document. This
//! crate has no storage of its own: [`CartService`] checks the product exists
//! through a [`ProductRepository`](domain_products::ProductRepository) and
//! mutates the cart through a [`UserRepository`](domain_users::UserRepository).
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /cart/* behind the bearer-token gate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ CartService │  ← product check, set semantics, checkout stubs
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼────────┐
//! │Users │ │ Products │  ← repositories from the other domains
//! └──────┘ └──────────┘
//! ```
//!
//! Checkout (`/buy`, `/instantbuy`) answers 501 and writes nothing.

pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use error::{CartError, CartResult};
pub use handlers::ApiDoc;
pub use models::{CartMessage, CartQuery, CartResponse, InstantBuyQuery};
pub use service::CartService;
