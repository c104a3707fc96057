use crate::application::auth::logout::LogoutUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{REFRESH_COOKIE, access_cookie, cleared_cookies, read_cookie};
use crate::presentation::dtos::{AccessTokenResource, MessageResource, PrincipalResource};
use crate::presentation::extractors::AuthPrincipal;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::ApiResponse;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

/// Exchange the refresh cookie for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    responses(
        (status = 200, description = "New access token issued; access cookie set", body = ApiResponse<AccessTokenResource>),
        (status = 401, description = "Refresh token missing, invalid, expired or revoked", body = ErrorResponse)
    ),
    tag = "Client / Session"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = read_cookie(&headers, REFRESH_COOKIE).ok_or(AppError::TokenNotFound)?;
    let refreshed = state.token_issuer().refresh(&token).await?;

    let cookie = access_cookie(&state.config, &refreshed);
    Ok((
        StatusCode::OK,
        cookie,
        Json(ApiResponse::new(AccessTokenResource::from(refreshed))),
    ))
}

/// End the session: revoke the refresh token and clear all session cookies
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<MessageResource>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / Session"
)]
pub async fn logout(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse, AppError> {
    LogoutUseCase::new(state.token_issuer())
        .execute(&principal)
        .await?;

    Ok((
        StatusCode::OK,
        cleared_cookies(&state.config),
        Json(ApiResponse::new(MessageResource::new("Logged out"))),
    ))
}

/// The authenticated principal, tagged by kind
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current principal", body = ApiResponse<PrincipalResource>),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Client / Session"
)]
pub async fn me(AuthPrincipal(principal): AuthPrincipal) -> impl IntoResponse {
    Json(ApiResponse::new(PrincipalResource::from(principal)))
}
