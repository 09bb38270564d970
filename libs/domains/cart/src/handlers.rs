//! Cart endpoints. Mount behind `jwt_auth_middleware`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    CurrentUser, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, NotImplementedResponse, UnauthorizedResponse,
    },
};
use domain_products::ProductRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{CartMessage, CartQuery, CartResponse, InstantBuyQuery};
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(add_to_cart, remove_from_cart, get_cart, buy_from_cart, instant_buy),
    components(
        schemas(CartMessage, CartResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            NotImplementedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Cart", description = "Cart of the authenticated user")
    )
)]
pub struct ApiDoc;

pub fn router<U, P>(service: CartService<U, P>) -> Router
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/add", post(add_to_cart))
        .route("/remove", delete(remove_from_cart))
        .route("/items", get(get_cart))
        .route("/buy", post(buy_from_cart))
        .route("/instantbuy", post(instant_buy))
        .with_state(Arc::new(service))
}

/// A `user_id` query parameter, when sent, must name the caller
fn ensure_caller(caller: &CurrentUser, requested: Option<Uuid>) -> CartResult<()> {
    if requested.is_some_and(|id| id != caller.id) {
        tracing::warn!(caller = %caller.id, "Cart request for another user rejected");
        return Err(CartError::Forbidden);
    }
    Ok(())
}

/// Add a product to the cart
#[utoipa::path(
    post,
    path = "/add",
    tag = "Cart",
    params(CartQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product added", body = CartMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_to_cart<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<CartService<U, P>>>,
    user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<CartQuery>,
) -> CartResult<impl IntoResponse> {
    ensure_caller(&user, query.user_id)?;
    service.add_to_cart(user.id, query.product_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CartMessage::new("Successfully added to the cart")),
    ))
}

/// Remove a product from the cart
#[utoipa::path(
    delete,
    path = "/remove",
    tag = "Cart",
    params(CartQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product removed", body = CartMessage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_from_cart<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<CartService<U, P>>>,
    user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<CartQuery>,
) -> CartResult<Json<CartMessage>> {
    ensure_caller(&user, query.user_id)?;
    service.remove_from_cart(user.id, query.product_id).await?;

    Ok(Json(CartMessage::new("Successfully removed from the cart")))
}

/// List the product ids in the cart
#[utoipa::path(
    get,
    path = "/items",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_cart<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<CartService<U, P>>>,
    user: CurrentUser,
) -> CartResult<Json<CartResponse>> {
    let cart = service.get_cart(user.id).await?;
    Ok(Json(CartResponse { cart }))
}

/// Check out the whole cart (not implemented)
#[utoipa::path(
    post,
    path = "/buy",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 401, response = UnauthorizedResponse),
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn buy_from_cart<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<CartService<U, P>>>,
    user: CurrentUser,
) -> CartResult<Json<CartMessage>> {
    service.buy_from_cart(user.id).await?;
    Ok(Json(CartMessage::new("Order placed")))
}

/// Buy a single product right away (not implemented)
#[utoipa::path(
    post,
    path = "/instantbuy",
    tag = "Cart",
    params(InstantBuyQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn instant_buy<U: UserRepository, P: ProductRepository>(
    State(service): State<Arc<CartService<U, P>>>,
    user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<InstantBuyQuery>,
) -> CartResult<Json<CartMessage>> {
    service.instant_buy(user.id, query.product_id).await?;
    Ok(Json(CartMessage::new("Order placed")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller() -> CurrentUser {
        CurrentUser {
            id: Uuid::now_v7(),
            email: "me@shop.io".to_string(),
        }
    }

    #[test]
    fn test_ensure_caller() {
        let me = caller();

        assert!(ensure_caller(&me, None).is_ok());
        assert!(ensure_caller(&me, Some(me.id)).is_ok());
        assert!(matches!(
            ensure_caller(&me, Some(Uuid::now_v7())),
            Err(CartError::Forbidden)
        ));
    }
}
