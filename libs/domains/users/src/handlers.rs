//! Address book endpoints. Mount behind `jwt_auth_middleware`.

use axum::{
    Json, Router,
    extract::State,
    routing::{post, put},
};
use axum_helpers::{
    CurrentUser, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::address_service::AddressService;
use crate::error::UserResult;
use crate::models::{Address, AddressInput, AddressResponse, MessageResponse};
use crate::repository::UserRepository;

#[derive(OpenApi)]
#[openapi(
    paths(add_address, edit_address, delete_address),
    components(
        schemas(Address, AddressInput, AddressResponse, MessageResponse),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Address", description = "Address book of the authenticated user")
    )
)]
pub struct AddressApiDoc;

pub fn router<R: UserRepository + 'static>(service: AddressService<R>) -> Router {
    Router::new()
        .route("/", post(add_address))
        .route("/{address_id}", put(edit_address).delete(delete_address))
        .with_state(Arc::new(service))
}

/// Add an address for the caller
#[utoipa::path(
    post,
    path = "",
    tag = "Address",
    request_body = AddressInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address added", body = AddressResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_address<R: UserRepository>(
    State(service): State<Arc<AddressService<R>>>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<AddressInput>,
) -> UserResult<Json<AddressResponse>> {
    let address = service.add_address(user.id, input).await?;

    Ok(Json(AddressResponse {
        message: "Successfully added the address".to_string(),
        address,
    }))
}

/// Overwrite one of the caller's addresses
#[utoipa::path(
    put,
    path = "/{address_id}",
    tag = "Address",
    params(
        ("address_id" = Uuid, Path, description = "Address ID")
    ),
    request_body = AddressInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address updated", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn edit_address<R: UserRepository>(
    State(service): State<Arc<AddressService<R>>>,
    user: CurrentUser,
    UuidPath(address_id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddressInput>,
) -> UserResult<Json<MessageResponse>> {
    service.edit_address(user.id, address_id, input).await?;
    Ok(Json(MessageResponse::new("Successfully updated the address")))
}

/// Delete one of the caller's addresses
#[utoipa::path(
    delete,
    path = "/{address_id}",
    tag = "Address",
    params(
        ("address_id" = Uuid, Path, description = "Address ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_address<R: UserRepository>(
    State(service): State<Arc<AddressService<R>>>,
    user: CurrentUser,
    UuidPath(address_id): UuidPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete_address(user.id, address_id).await?;
    Ok(Json(MessageResponse::new("Successfully deleted the address")))
}
