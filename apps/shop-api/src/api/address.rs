//! Address book routes

use axum::Router;
use domain_users::{AddressService, handlers};

use crate::state::AppState;

/// Create address router
pub fn router(state: &AppState) -> Router {
    let service = AddressService::from_shared(state.users.clone());
    handlers::router(service)
}
