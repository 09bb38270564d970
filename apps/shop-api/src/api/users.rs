//! Account and catalog routes under `/users`

use axum::Router;
use domain_products::{ProductService, handlers as product_handlers};
use domain_users::{AuthService, auth_handlers};

use crate::state::AppState;

/// Sign-up, login and refresh next to the product listing and search
pub fn router(state: &AppState) -> Router {
    let auth = AuthService::from_shared(state.users.clone(), state.jwt.clone());
    let products = ProductService::from_shared(state.products.clone());

    auth_handlers::router(auth).merge(product_handlers::router(products))
}

/// Unique email index for users plus the product name index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    state.users.init_indexes().await?;
    state.products.init_indexes().await?;
    Ok(())
}
