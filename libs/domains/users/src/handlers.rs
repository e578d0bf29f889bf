//! HTTP handlers for the Users API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    ValidatedJson,
};
use core_config::jwt::JwtConfig;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, TokenRequest, TokenResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::token;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, generate_token),
    components(
        schemas(CreateUser, UserResponse, TokenRequest, TokenResponse),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User accounts and token issuance")
    )
)]
pub struct ApiDoc;

/// Application state for user handlers
#[derive(Clone)]
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtConfig,
}

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + Clone + 'static>(
    service: UserService<R>,
    jwt: JwtConfig,
) -> Router {
    let state = AuthState { service, jwt };

    Router::new()
        .route("/", post(create_user))
        .route("/token", post(generate_token))
        .with_state(state)
}

/// Create a new user account
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository + Clone>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/token",
    tag = "Users",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn generate_token<R: UserRepository + Clone>(
    State(state): State<AuthState<R>>,
    Json(credentials): Json<TokenRequest>,
) -> UserResult<Json<TokenResponse>> {
    let user = state
        .service
        .authenticate(&credentials.email, &credentials.password)
        .await?;

    let access_token = token::issue_token(&user, &state.jwt)?;
    Ok(Json(TokenResponse { access_token }))
}
