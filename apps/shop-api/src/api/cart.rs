//! Cart routes

use axum::Router;
use domain_cart::{CartService, handlers};

use crate::state::AppState;

/// Create cart router
pub fn router(state: &AppState) -> Router {
    let service = CartService::new(state.users.clone(), state.products.clone());
    handlers::router(service)
}
