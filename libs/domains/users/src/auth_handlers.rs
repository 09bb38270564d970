//! Public signup, login and token refresh endpoints

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    LoginRequest, LoginResponse, RefreshRequest, SignUpRequest, SignUpResponse, TokenResponse,
    UserResponse,
};
use crate::repository::UserRepository;
use crate::service::AuthService;

#[derive(OpenApi)]
#[openapi(
    paths(sign_up, login, refresh),
    components(
        schemas(
            SignUpRequest, SignUpResponse, LoginRequest, LoginResponse,
            RefreshRequest, TokenResponse, UserResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login and token refresh")
    )
)]
pub struct AuthApiDoc;

pub fn router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .with_state(Arc::new(service))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User created", body = SignUpResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sign_up<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> UserResult<impl IntoResponse> {
    let user = service.sign_up(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "Successfully signed up".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login with email/password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let (user, tokens) = service.login(input).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "Auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> UserResult<Json<TokenResponse>> {
    let tokens = service.refresh(&input.refresh_token).await?;

    Ok(Json(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}
