//! HTTP handlers for the public catalog

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductList, SearchQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_products, search_products),
    components(
        schemas(Product, ProductList),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Public product catalog")
    )
)]
pub struct ApiDoc;

/// Create the catalog router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/productview", get(list_products))
        .route("/search", get(search_products))
        .with_state(shared_service)
}

/// List every product
#[utoipa::path(
    get,
    path = "/productview",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductList>> {
    let products = service.list_products().await?;
    Ok(Json(products.into()))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = ProductList),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<ProductList>> {
    let products = service.search_products(query.q.as_deref()).await?;
    Ok(Json(products.into()))
}
